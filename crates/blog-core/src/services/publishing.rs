use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Comment, Contact, Post, PostChanges, PostDraft, PostQuery, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{CommentRepository, ContactRepository, PostRepository, UserRepository};

/// Administrative writes: authoring posts, moderating comments and reading
/// the contact inbox.
#[derive(Clone)]
pub struct PublishingService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    contacts: Arc<dyn ContactRepository>,
}

impl PublishingService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        contacts: Arc<dyn ContactRepository>,
    ) -> Self {
        Self {
            users,
            posts,
            comments,
            contacts,
        }
    }

    /// Register an author, or return the existing one with that username.
    pub async fn ensure_author(&self, username: &str, email: &str) -> Result<User, DomainError> {
        if let Some(existing) = self.users.find_by_username(username).await? {
            return Ok(existing);
        }
        let user = self
            .users
            .insert(User::new(username.to_string(), email.to_string()))
            .await?;
        Ok(user)
    }

    /// Create a post. The slug is fixed here, derived from the title when
    /// the draft has none, and must be unique.
    pub async fn create_post(&self, draft: PostDraft) -> Result<Post, DomainError> {
        if self.users.find_by_id(draft.author_id).await?.is_none() {
            return Err(DomainError::not_found("user", draft.author_id));
        }

        let post = Post::from_draft(draft);
        if self
            .posts
            .find_one(&PostQuery::any().with_slug(&post.slug))
            .await?
            .is_some()
        {
            return Err(DomainError::Duplicate(format!("slug '{}'", post.slug)));
        }

        let saved = self.posts.insert(post).await.map_err(|e| match e {
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            other => other.into(),
        })?;

        tracing::info!(
            post_id = %saved.id,
            slug = %saved.slug,
            status = %saved.status,
            "Post created"
        );
        Ok(saved)
    }

    pub async fn update_post(&self, id: Uuid, changes: PostChanges) -> Result<Post, DomainError> {
        let mut post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id))?;
        post.apply(changes);
        Ok(self.posts.update(post).await?)
    }

    /// Delete a post together with its comments.
    pub async fn delete_post(&self, id: Uuid) -> Result<(), DomainError> {
        self.posts.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("post", id),
            other => other.into(),
        })?;
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    pub async fn set_comment_active(&self, id: Uuid, active: bool) -> Result<Comment, DomainError> {
        self.comments.set_active(id, active).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("comment", id),
            other => other.into(),
        })
    }

    /// Every comment on a post, moderated ones included.
    pub async fn all_comments(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        Ok(self.comments.find_by_post(post_id, false).await?)
    }

    pub async fn recent_contacts(&self, limit: u64) -> Result<Vec<Contact>, DomainError> {
        Ok(self.contacts.find_recent(limit).await?)
    }
}
