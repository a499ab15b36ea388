//! # Blog Core
//!
//! The domain layer of the blog.
//! This crate contains the content query and submission pipelines with zero
//! infrastructure dependencies; storage, mail and sessions are reached
//! through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod services;
pub mod validation;

pub use error::{DomainError, FieldErrors};
