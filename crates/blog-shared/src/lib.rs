//! # Blog Shared
//!
//! Wire-level types: submitted forms, query strings, template view models
//! and problem details for error pages.

pub mod dto;
pub mod response;

pub use dto::{
    CommentForm, CommentView, ContactForm, PaginationView, PostListParams, PostView,
};
pub use response::ErrorResponse;
