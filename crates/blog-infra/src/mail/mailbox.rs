//! Local mailbox notifier - used when SMTP is not configured.
//!
//! Messages are logged and kept in memory instead of being delivered.

use async_trait::async_trait;
use tokio::sync::Mutex;

use blog_core::ports::{Notifier, NotifyError};

/// A message accepted by the [`MailboxNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct MailboxNotifier {
    outbox: Mutex<Vec<SentMail>>,
}

impl MailboxNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, oldest first.
    pub async fn sent(&self) -> Vec<SentMail> {
        self.outbox.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for MailboxNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        tracing::info!(to, subject, "Mail delivered to local mailbox (SMTP not configured)");
        tracing::debug!(body, "Mailbox message body");

        self.outbox.lock().await.push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
