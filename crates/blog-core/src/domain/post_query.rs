//! Post selection criteria shared by every read path.
//!
//! Repositories translate a [`PostQuery`] into their own query language;
//! [`PostQuery::matches`] is the reference predicate in-memory stores use.

use super::post::{Post, PostStatus};

/// Which publication states a query may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Anonymous readers: published posts only.
    Published,
    /// Administrative access: every post.
    Any,
}

impl Visibility {
    pub fn admits(&self, status: PostStatus) -> bool {
        match self {
            Visibility::Published => status == PostStatus::Published,
            Visibility::Any => true,
        }
    }
}

/// Reader-supplied filters for the listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Case-insensitive substring matched against title OR body.
    pub query: Option<String>,
    /// Case-insensitive substring matched against the tags field.
    pub tag: Option<String>,
}

impl PostFilter {
    /// Build a filter, treating blank values as absent.
    pub fn new(query: Option<&str>, tag: Option<&str>) -> Self {
        Self {
            query: non_blank(query),
            tag: non_blank(tag),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.tag.is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A complete post selection: visibility, optional exact slug, and filters.
///
/// Constructed through [`PostQuery::published`] on every public path so the
/// visibility rule cannot be forgotten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub visibility: Visibility,
    pub slug: Option<String>,
    pub search: Option<String>,
    pub tag: Option<String>,
}

impl PostQuery {
    pub fn published() -> Self {
        Self {
            visibility: Visibility::Published,
            slug: None,
            search: None,
            tag: None,
        }
    }

    pub fn any() -> Self {
        Self {
            visibility: Visibility::Any,
            ..Self::published()
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_filter(mut self, filter: &PostFilter) -> Self {
        self.search = filter.query.clone();
        self.tag = filter.tag.clone();
        self
    }

    pub fn matches(&self, post: &Post) -> bool {
        if !self.visibility.admits(post.status) {
            return false;
        }
        if let Some(slug) = &self.slug {
            if &post.slug != slug {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !contains_ci(&post.title, search) && !contains_ci(&post.body, search) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !contains_ci(&post.tags, tag) {
                return false;
            }
        }
        true
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
