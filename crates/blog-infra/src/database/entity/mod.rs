//! SeaORM entities for the content tables.

pub mod comment;
pub mod contact;
pub mod post;
pub mod user;
