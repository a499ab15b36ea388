//! Application services - the read and write pipelines behind each page.

mod comments;
mod contact;
mod publishing;
mod query;

pub use comments::CommentPipeline;
pub use contact::{ContactPipeline, ContactSettings};
pub use publishing::PublishingService;
pub use query::{POSTS_PER_PAGE, PostQueryService, RECENT_POSTS_LIMIT};
