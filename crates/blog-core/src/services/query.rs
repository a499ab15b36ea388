use std::sync::Arc;

use crate::domain::{Post, PostFilter, PostQuery};
use crate::error::DomainError;
use crate::pagination::{Page, PageRequest};
use crate::ports::{PostRepository, Window};

/// Number of posts on the landing page.
pub const RECENT_POSTS_LIMIT: u64 = 5;

/// Page size of the post listing.
pub const POSTS_PER_PAGE: u64 = 5;

/// Read-side views over published posts.
///
/// Every query starts from [`PostQuery::published`]; drafts are unreachable
/// through this service.
#[derive(Clone)]
pub struct PostQueryService {
    posts: Arc<dyn PostRepository>,
}

impl PostQueryService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Newest published posts, at most `limit` of them.
    pub async fn list_recent_published(&self, limit: u64) -> Result<Vec<Post>, DomainError> {
        let posts = self
            .posts
            .find(&PostQuery::published(), Window::first(limit))
            .await?;
        Ok(posts)
    }

    /// One page of published posts matching `filter`, newest first.
    pub async fn list_published(
        &self,
        filter: &PostFilter,
        page: u64,
        page_size: u64,
    ) -> Result<Page<Post>, DomainError> {
        let query = PostQuery::published().with_filter(filter);
        let request = PageRequest::new(page, page_size);
        let total = self.posts.count(&query).await?;
        let mut result = Page::new(Vec::new(), request, total);

        if !result.in_range() {
            tracing::debug!(page, total_pages = result.total_pages, "Page out of range");
            return Ok(result);
        }

        result.items = self
            .posts
            .find(
                &query,
                Window {
                    offset: request.offset(),
                    limit: request.per_page,
                },
            )
            .await?;
        Ok(result)
    }

    /// The published post with this slug.
    pub async fn get_published_by_slug(&self, slug: &str) -> Result<Post, DomainError> {
        self.posts
            .find_one(&PostQuery::published().with_slug(slug))
            .await?
            .ok_or_else(|| DomainError::not_found("post", slug))
    }
}
