//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//! This crate contains database, mail, session and rate limiting adapters.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `postgres` - PostgreSQL content store via SeaORM
//! - `mail` - SMTP notifications via lettre
//! - `rate-limit` - Per-client rate limiting via governor

pub mod database;
pub mod mail;
pub mod session;
pub mod store;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

// Re-exports - In-Memory
pub use mail::MailboxNotifier;
pub use session::InMemorySession;
pub use store::InMemoryStore;

#[cfg(feature = "postgres")]
pub use database::DatabasePool;

#[cfg(feature = "mail")]
pub use mail::{SmtpConfig, SmtpNotifier};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
