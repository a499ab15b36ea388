use crate::ports::{SessionError, SessionState};

/// A transient, keyed session flag.
///
/// The producer raises it once; the next consumer reads and clears it in a
/// single step, so the notice is shown exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneShotNotice {
    key: &'static str,
}

/// Raised after a contact message has been stored and forwarded.
pub const CONTACT_ACKNOWLEDGED: OneShotNotice = OneShotNotice::new("contact_sent");

impl OneShotNotice {
    pub const fn new(key: &'static str) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn raise(&self, session: &dyn SessionState) -> Result<(), SessionError> {
        session.set(self.key, true)
    }

    /// Read the flag and clear it. Returns `false` when it was never raised.
    pub fn consume(&self, session: &dyn SessionState) -> Result<bool, SessionError> {
        Ok(session.pop(self.key)?.unwrap_or(false))
    }

    /// Look at the flag without clearing it.
    pub fn peek(&self, session: &dyn SessionState) -> Result<bool, SessionError> {
        Ok(session.get(self.key)?.unwrap_or(false))
    }
}
