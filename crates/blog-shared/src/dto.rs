//! Data Transfer Objects - forms, query strings and view models.

use serde::{Deserialize, Serialize};

/// Query string of the post list: `?q=...&tag=...&page=...`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostListParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    /// Kept raw so a malformed value can be told apart from a missing one.
    #[serde(default)]
    pub page: Option<String>,
}

impl PostListParams {
    /// Requested page number. Missing means the first page; anything that is
    /// not a non-negative integer maps to page 0, which is always empty.
    pub fn page_number(&self) -> u64 {
        match self.page.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => raw.parse().unwrap_or(0),
        }
    }
}

/// Comment form as posted from a post detail page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentForm {
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Contact form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
}

/// A post as templates see it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub tags: Vec<String>,
    pub url: String,
    /// `YYYY-MM-DD`
    pub published_on: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub name: String,
    pub body: String,
    /// `YYYY-MM-DD HH:MM`
    pub posted_at: String,
}

/// Navigation state of a paginated list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationView {
    pub number: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_previous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>) -> PostListParams {
        PostListParams {
            page: page.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_page_number_defaults_to_first() {
        assert_eq!(params(None).page_number(), 1);
        assert_eq!(params(Some("")).page_number(), 1);
    }

    #[test]
    fn test_page_number_parses_integers() {
        assert_eq!(params(Some("3")).page_number(), 3);
        assert_eq!(params(Some(" 2 ")).page_number(), 2);
    }

    #[test]
    fn test_malformed_page_number_is_out_of_range() {
        assert_eq!(params(Some("abc")).page_number(), 0);
        assert_eq!(params(Some("-1")).page_number(), 0);
    }

    #[test]
    fn test_partial_form_fills_missing_fields() {
        let form: ContactForm =
            serde_json::from_str(r#"{"name":"Ann","email":"ann@example.com"}"#).unwrap();
        assert_eq!(form.name, "Ann");
        assert!(form.subject.is_empty());
        assert!(form.body.is_empty());
    }
}
