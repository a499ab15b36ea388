//! Session state implementations.

mod memory;

pub use memory::InMemorySession;
