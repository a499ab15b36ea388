//! In-memory content store - used when no database is configured.
//!
//! Enforces the same constraints the PostgreSQL schema does: unique post
//! slugs and usernames, foreign keys from posts to users and from comments
//! to posts, and cascading deletes along both.
//! Note: Data is lost on process restart.

use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Comment, Contact, Post, PostQuery, User};
use blog_core::error::RepoError;
use blog_core::ports::{
    BaseRepository, CommentRepository, ContactRepository, PostRepository, UserRepository, Window,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
    contacts: HashMap<Uuid, Contact>,
}

impl Tables {
    fn remove_post(&mut self, id: Uuid) -> bool {
        if self.posts.remove(&id).is_none() {
            return false;
        }
        self.comments.retain(|_, c| c.post_id != id);
        true
    }

    /// Posts matching `query`, newest first. Ties break on id so repeated
    /// calls return the same order.
    fn matching_posts(&self, query: &PostQuery) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.values().filter(|p| query.matches(p)).collect();
        posts.sort_by_key(|p| (Reverse(p.created_at), p.id));
        posts
    }
}

/// All four tables behind one async `RwLock`, so cascades are atomic.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn window<T>(items: Vec<T>, window: Window) -> Vec<T> {
    let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);
    items.into_iter().skip(offset).take(limit).collect()
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                user.username
            )));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        let owned: Vec<Uuid> = tables
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in owned {
            tables.remove_post(post_id);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&post.author_id) {
            return Err(RepoError::Constraint(format!(
                "author {} does not exist",
                post.author_id
            )));
        }
        if tables.posts.values().any(|p| p.slug == post.slug) {
            return Err(RepoError::Constraint(format!(
                "slug '{}' already exists",
                post.slug
            )));
        }
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.remove_post(id) {
            Ok(())
        } else {
            Err(RepoError::NotFound)
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find(&self, query: &PostQuery, win: Window) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let posts = tables.matching_posts(query).into_iter().cloned().collect();
        Ok(window(posts, win))
    }

    async fn find_one(&self, query: &PostQuery) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.matching_posts(query).first().map(|p| (*p).clone()))
    }

    async fn count(&self, query: &PostQuery) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.values().filter(|p| query.matches(p)).count() as u64)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if tables
            .posts
            .values()
            .any(|p| p.slug == post.slug && p.id != post.id)
        {
            return Err(RepoError::Constraint(format!(
                "slug '{}' already exists",
                post.slug
            )));
        }
        match tables.posts.get_mut(&post.id) {
            Some(stored) => {
                *stored = post.clone();
                Ok(post)
            }
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(RepoError::Constraint(format!(
                "post {} does not exist",
                comment.post_id
            )));
        }
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables
            .comments
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_post(
        &self,
        post_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id && (c.active || !active_only))
            .cloned()
            .collect();
        comments.sort_by_key(|c| (c.created_at, c.id));
        Ok(comments)
    }

    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .count() as u64)
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        let comment = tables.comments.get_mut(&id).ok_or(RepoError::NotFound)?;
        comment.active = active;
        Ok(comment.clone())
    }
}

#[async_trait]
impl BaseRepository<Contact, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, RepoError> {
        Ok(self.tables.read().await.contacts.get(&id).cloned())
    }

    async fn insert(&self, contact: Contact) -> Result<Contact, RepoError> {
        let mut tables = self.tables.write().await;
        tables.contacts.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables
            .contacts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl ContactRepository for InMemoryStore {
    async fn find_recent(&self, limit: u64) -> Result<Vec<Contact>, RepoError> {
        let tables = self.tables.read().await;
        let mut contacts: Vec<Contact> = tables.contacts.values().cloned().collect();
        contacts.sort_by_key(|c| (Reverse(c.created_at), c.id));
        Ok(window(contacts, Window::first(limit)))
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.tables.read().await.contacts.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use blog_core::domain::{PostDraft, PostStatus};
    use chrono::{Duration, Utc};

    use super::*;

    async fn seeded() -> (Arc<InMemoryStore>, User) {
        let store = Arc::new(InMemoryStore::new());
        let author = User::new("author".to_string(), "author@example.com".to_string());
        BaseRepository::<User, Uuid>::insert(store.as_ref(), author.clone())
            .await
            .unwrap();
        (store, author)
    }

    fn post_at(author: &User, title: &str, minutes_ago: i64) -> Post {
        let mut post = Post::from_draft(PostDraft::new(author.id, title, "body").published());
        post.created_at = Utc::now() - Duration::minutes(minutes_ago);
        post
    }

    #[tokio::test]
    async fn test_posts_are_newest_first() {
        let (store, author) = seeded().await;
        let posts: Arc<dyn PostRepository> = store;
        posts.insert(post_at(&author, "Old", 30)).await.unwrap();
        posts.insert(post_at(&author, "New", 1)).await.unwrap();
        posts.insert(post_at(&author, "Middle", 10)).await.unwrap();

        let titles: Vec<String> = posts
            .find(&PostQuery::published(), Window::first(10))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["New", "Middle", "Old"]);
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_a_constraint_violation() {
        let (store, author) = seeded().await;
        let posts: Arc<dyn PostRepository> = store;
        posts.insert(post_at(&author, "Same", 2)).await.unwrap();

        let result = posts.insert(post_at(&author, "Same", 1)).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_post_requires_existing_author() {
        let store = InMemoryStore::new();
        let stranger = User::new("ghost".to_string(), "ghost@example.com".to_string());
        let result =
            BaseRepository::<Post, Uuid>::insert(&store, post_at(&stranger, "Orphan", 1)).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_deleting_post_cascades_to_comments() {
        let (store, author) = seeded().await;
        let post = post_at(&author, "Doomed", 1);
        let post_id = post.id;
        let posts: Arc<dyn PostRepository> = store.clone();
        let comments: Arc<dyn CommentRepository> = store;

        posts.insert(post).await.unwrap();
        comments
            .insert(Comment::new(
                post_id,
                "Reader".to_string(),
                "reader@example.com".to_string(),
                "Hi".to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(comments.count_by_post(post_id).await.unwrap(), 1);

        posts.delete(post_id).await.unwrap();
        assert_eq!(comments.count_by_post(post_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_inactive_comments_are_filtered() {
        let (store, author) = seeded().await;
        let post = post_at(&author, "Talk", 1);
        let post_id = post.id;
        let posts: Arc<dyn PostRepository> = store.clone();
        let comments: Arc<dyn CommentRepository> = store;
        posts.insert(post).await.unwrap();

        let hidden = comments
            .insert(Comment::new(
                post_id,
                "Spammer".to_string(),
                "spam@example.com".to_string(),
                "Buy now".to_string(),
            ))
            .await
            .unwrap();
        comments.set_active(hidden.id, false).await.unwrap();

        assert!(comments.find_by_post(post_id, true).await.unwrap().is_empty());
        assert_eq!(comments.find_by_post(post_id, false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_unique_slugs() {
        let (store, author) = seeded().await;
        let posts: Arc<dyn PostRepository> = store;
        posts.insert(post_at(&author, "First", 2)).await.unwrap();
        let mut second = posts.insert(post_at(&author, "Second", 1)).await.unwrap();

        second.slug = "first".to_string();
        let result = posts.update(second).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_drafts_are_counted_only_for_admin_queries() {
        let (store, author) = seeded().await;
        let posts: Arc<dyn PostRepository> = store;
        let mut draft = post_at(&author, "Draft", 1);
        draft.status = PostStatus::Draft;
        posts.insert(draft).await.unwrap();

        assert_eq!(posts.count(&PostQuery::published()).await.unwrap(), 0);
        assert_eq!(posts.count(&PostQuery::any()).await.unwrap(), 1);
    }
}
