use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact entity - a message sent to the site owner. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Contact {
    pub fn new(name: String, email: String, subject: String, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            subject,
            body,
            created_at: Utc::now(),
        }
    }
}
