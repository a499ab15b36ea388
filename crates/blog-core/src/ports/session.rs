//! Per-requester session state.

/// Boolean flags stored against the requester's session.
///
/// Not `Send`: implementations wrap request-local session handles.
pub trait SessionState {
    fn get(&self, key: &str) -> Result<Option<bool>, SessionError>;

    fn set(&self, key: &str, value: bool) -> Result<(), SessionError>;

    /// Remove the key, returning the value it held.
    fn pop(&self, key: &str) -> Result<Option<bool>, SessionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to read session: {0}")]
    Read(String),

    #[error("Failed to write session: {0}")]
    Write(String),
}
