//! Notification transports - SMTP and a local mailbox fallback.

mod mailbox;

pub use mailbox::{MailboxNotifier, SentMail};

#[cfg(feature = "mail")]
mod smtp;
#[cfg(feature = "mail")]
pub use smtp::{SmtpConfig, SmtpNotifier};
