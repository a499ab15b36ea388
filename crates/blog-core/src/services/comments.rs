use std::sync::Arc;

use uuid::Uuid;

use super::query::PostQueryService;
use crate::domain::Comment;
use crate::error::DomainError;
use crate::ports::CommentRepository;
use crate::validation::{CommentInput, mask_email};

/// Accepts reader comments on published posts and serves the visible ones.
#[derive(Clone)]
pub struct CommentPipeline {
    posts: PostQueryService,
    comments: Arc<dyn CommentRepository>,
}

impl CommentPipeline {
    pub fn new(posts: PostQueryService, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    /// Attach a comment to the published post at `post_slug`.
    ///
    /// The post is resolved before the input is validated, so an unknown
    /// slug is reported as `NotFound` whatever the form contains.
    pub async fn submit_comment(
        &self,
        post_slug: &str,
        input: CommentInput,
    ) -> Result<Comment, DomainError> {
        let post = self.posts.get_published_by_slug(post_slug).await?;
        input.check()?;

        let comment = Comment::new(post.id, input.name, input.email, input.body);
        let saved = self.comments.insert(comment).await?;

        tracing::info!(
            post_slug = %post.slug,
            comment_id = %saved.id,
            author_email = %mask_email(&saved.email),
            "Comment created"
        );
        Ok(saved)
    }

    /// Active comments on a post, oldest first.
    pub async fn visible_comments(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        Ok(self.comments.find_by_post(post_id, true).await?)
    }
}
