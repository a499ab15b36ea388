use std::sync::Arc;

use crate::domain::{CONTACT_ACKNOWLEDGED, Contact};
use crate::error::DomainError;
use crate::ports::{ContactRepository, Notifier, SessionState};
use crate::validation::{ContactInput, mask_email};

/// Where contact notifications go and how they are labelled.
#[derive(Debug, Clone)]
pub struct ContactSettings {
    /// Operator address receiving every contact message.
    pub recipient: String,
    /// Prefix put in front of the submitter's subject line.
    pub subject_tag: String,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            recipient: "owner@localhost".to_string(),
            subject_tag: "[My Blog] Contact:".to_string(),
        }
    }
}

/// Stores contact messages, forwards them to the operator and acknowledges
/// the submission once in the sender's session.
#[derive(Clone)]
pub struct ContactPipeline {
    contacts: Arc<dyn ContactRepository>,
    notifier: Arc<dyn Notifier>,
    settings: ContactSettings,
}

impl ContactPipeline {
    pub fn new(
        contacts: Arc<dyn ContactRepository>,
        notifier: Arc<dyn Notifier>,
        settings: ContactSettings,
    ) -> Self {
        Self {
            contacts,
            notifier,
            settings,
        }
    }

    /// Validate, persist, notify, then raise the acknowledgment flag.
    ///
    /// Persistence and notification are not transactional: when sending
    /// fails the record stays stored and `DomainError::Notification` is
    /// returned without raising the flag.
    pub async fn submit_contact(
        &self,
        input: ContactInput,
        session: &dyn SessionState,
    ) -> Result<Contact, DomainError> {
        input.check()?;

        let contact = Contact::new(input.name, input.email, input.subject, input.body);
        let saved = self.contacts.insert(contact).await?;

        let (subject, body) = self.compose(&saved);
        if let Err(e) = self
            .notifier
            .send(&self.settings.recipient, &subject, &body)
            .await
        {
            tracing::error!(
                contact_id = %saved.id,
                error = %e,
                "Contact saved but operator notification failed"
            );
            return Err(DomainError::Notification {
                contact_id: saved.id,
                reason: e.to_string(),
            });
        }

        // Stored and delivered; a lost flag only hides the notice.
        if let Err(e) = CONTACT_ACKNOWLEDGED.raise(session) {
            tracing::warn!(
                contact_id = %saved.id,
                error = %e,
                "Could not record contact acknowledgment in session"
            );
        }

        tracing::info!(
            contact_id = %saved.id,
            sender = %mask_email(&saved.email),
            "Contact message received"
        );
        Ok(saved)
    }

    /// Whether this session has an unseen acknowledgment. Reading clears it.
    pub fn take_acknowledgement(&self, session: &dyn SessionState) -> Result<bool, DomainError> {
        Ok(CONTACT_ACKNOWLEDGED.consume(session)?)
    }

    fn compose(&self, contact: &Contact) -> (String, String) {
        let subject = format!("{} {}", self.settings.subject_tag, contact.subject);
        let body = format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            contact.name, contact.email, contact.body
        );
        (subject, body)
    }
}
