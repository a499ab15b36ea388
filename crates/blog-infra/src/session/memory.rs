//! In-memory session state for a single requester.
//!
//! Backs background tasks and tests; HTTP requests use the cookie session
//! in the server.

use std::collections::HashMap;
use std::sync::Mutex;

use blog_core::ports::{SessionError, SessionState};

#[derive(Default)]
pub struct InMemorySession {
    values: Mutex<HashMap<String, bool>>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, bool>>, SessionError> {
        self.values
            .lock()
            .map_err(|_| SessionError::Read("session lock poisoned".to_string()))
    }
}

impl SessionState for InMemorySession {
    fn get(&self, key: &str) -> Result<Option<bool>, SessionError> {
        Ok(self.lock()?.get(key).copied())
    }

    fn set(&self, key: &str, value: bool) -> Result<(), SessionError> {
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }

    fn pop(&self, key: &str) -> Result<Option<bool>, SessionError> {
        Ok(self.lock()?.remove(key))
    }
}
