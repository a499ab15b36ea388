//! Domain entities - the core business objects.

mod comment;
mod contact;
mod notice;
mod post;
mod post_query;
mod user;

pub use comment::Comment;
pub use contact::Contact;
pub use notice::{CONTACT_ACKNOWLEDGED, OneShotNotice};
pub use post::{Post, PostChanges, PostDraft, PostStatus, derive_slug};
pub use post_query::{PostFilter, PostQuery, Visibility};
pub use user::User;
