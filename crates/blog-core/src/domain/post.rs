use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a post. Only `Published` posts are visible to readers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(format!("unknown post status '{other}'")),
        }
    }
}

/// Post entity - a blog article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    /// Unique, URL-safe identifier. Fixed at creation.
    pub slug: String,
    pub body: String,
    pub status: PostStatus,
    /// Free-text tag list, conventionally comma separated.
    pub tags: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Build a post from a draft, deriving the slug from the title when the
    /// draft does not carry one.
    pub fn from_draft(draft: PostDraft) -> Self {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let slug = match draft.slug.as_deref().map(slug::slugify) {
            Some(explicit) if !explicit.is_empty() => explicit,
            _ => derive_slug(&draft.title, id),
        };

        Self {
            id,
            author_id: draft.author_id,
            title: draft.title,
            slug,
            body: draft.body,
            status: draft.status,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Individual tags, split on commas with surrounding whitespace removed.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Apply an edit. The slug is never touched.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(body) = changes.body {
            self.body = body;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(tags) = changes.tags {
            self.tags = tags;
        }
        self.updated_at = Utc::now();
    }
}

/// Slug for a title. Titles that transliterate to nothing fall back to an
/// id-based slug so the result is never empty.
pub fn derive_slug(title: &str, id: Uuid) -> String {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        let simple = id.simple().to_string();
        format!("post-{}", &simple[..8])
    } else {
        slug
    }
}

/// Input for creating a post.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub author_id: Uuid,
    pub title: String,
    pub slug: Option<String>,
    pub body: String,
    pub status: PostStatus,
    pub tags: String,
}

impl PostDraft {
    pub fn new(author_id: Uuid, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            author_id,
            title: title.into(),
            slug: None,
            body: body.into(),
            status: PostStatus::Draft,
            tags: String::new(),
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    pub fn published(self) -> Self {
        self.with_status(PostStatus::Published)
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }
}

/// Partial update of an existing post.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub status: Option<PostStatus>,
    pub tags: Option<String>,
}
