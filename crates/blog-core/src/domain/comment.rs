use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - a reader's reply attached to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub name: String,
    pub email: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    /// Moderation flag. Inactive comments stay stored but are never shown.
    pub active: bool,
}

impl Comment {
    /// Create a new, visible comment on the given post.
    pub fn new(post_id: Uuid, name: String, email: String, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            name,
            email,
            body,
            created_at: Utc::now(),
            active: true,
        }
    }
}
