use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Contact, Post, PostQuery, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Unique violations surface as `RepoError::Constraint`.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Offset/limit slice of an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

impl Window {
    pub fn first(limit: u64) -> Self {
        Self { offset: 0, limit }
    }
}

/// User (author) repository.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository. Every read takes a [`PostQuery`]; results are ordered
/// newest `created_at` first.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find(&self, query: &PostQuery, window: Window) -> Result<Vec<Post>, RepoError>;

    async fn find_one(&self, query: &PostQuery) -> Result<Option<Post>, RepoError>;

    async fn count(&self, query: &PostQuery) -> Result<u64, RepoError>;

    /// Persist edits to an existing post. Deleting a post (via
    /// [`BaseRepository::delete`]) removes its comments as well.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;
}

/// Comment repository. Results are ordered oldest `created_at` first.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    async fn find_by_post(&self, post_id: Uuid, active_only: bool)
    -> Result<Vec<Comment>, RepoError>;

    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError>;

    /// Toggle the moderation flag.
    async fn set_active(&self, id: Uuid, active: bool) -> Result<Comment, RepoError>;
}

/// Contact message repository. Results are ordered newest first.
#[async_trait]
pub trait ContactRepository: BaseRepository<Contact, Uuid> {
    async fn find_recent(&self, limit: u64) -> Result<Vec<Contact>, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;
}
