//! Demo content for a fresh in-memory store.

use blog_core::DomainError;
use blog_core::domain::{PostDraft, PostStatus};
use blog_core::services::PublishingService;

const DEMO_POSTS: &[(&str, &str, &str, PostStatus)] = &[
    (
        "Hello, world",
        "Welcome to the blog. New posts show up on the home page first.",
        "meta",
        PostStatus::Published,
    ),
    (
        "Error handling with thiserror",
        "Typed error enums keep failure modes visible in signatures.\nEach layer maps its own errors.",
        "rust,errors",
        PostStatus::Published,
    ),
    (
        "Pagination that never fails",
        "Out of range pages come back empty instead of erroring.",
        "rust,web",
        PostStatus::Published,
    ),
    (
        "Notes on templates",
        "Tera renders every page of this site.",
        "web",
        PostStatus::Published,
    ),
    ("Unfinished thoughts", "Not ready yet.", "", PostStatus::Draft),
];

/// Create the demo author and posts. Posts whose slug already exists are
/// skipped, so running twice is harmless.
pub async fn seed_demo_content(publishing: &PublishingService) -> Result<usize, DomainError> {
    let author = publishing
        .ensure_author("owner", "owner@example.com")
        .await?;

    let mut created = 0;
    for (title, body, tags, status) in DEMO_POSTS {
        let draft = PostDraft::new(author.id, *title, *body)
            .with_tags(*tags)
            .with_status(*status);
        match publishing.create_post(draft).await {
            Ok(_) => created += 1,
            Err(DomainError::Duplicate(_)) => {}
            Err(e) => return Err(e),
        }
    }

    tracing::info!(created, "Demo content seeded");
    Ok(created)
}
