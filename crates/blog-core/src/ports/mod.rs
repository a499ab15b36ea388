//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod notifier;
mod rate_limit;
mod repository;
mod session;

pub use notifier::{Notifier, NotifyError};
pub use rate_limit::{RateLimitDecision, RateLimitError, RateLimiter};
pub use repository::{
    BaseRepository, CommentRepository, ContactRepository, PostRepository, UserRepository, Window,
};
pub use session::{SessionError, SessionState};
