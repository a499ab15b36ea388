//! Error handling - domain errors rendered as HTML problem pages.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tera::{Context, Tera};
use uuid::Uuid;

use blog_core::error::{DomainError, FieldErrors, RepoError};
use blog_shared::ErrorResponse;

use crate::views::ERROR_TEMPLATE;

/// Application-level error type rendered as an RFC 7807 shaped error page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Only reached when a handler does not re-render its own form.
    #[error("Validation errors: {0}")]
    Validation(FieldErrors),

    #[error("Message {contact_id} stored but notification failed")]
    NotificationFailed { contact_id: Uuid },

    #[error("Rate limited for {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn problem(&self) -> ErrorResponse {
        match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Validation(errors) => {
                ErrorResponse::new(422, "Validation Failed").with_detail(errors.to_string())
            }
            AppError::NotificationFailed { contact_id } => ErrorResponse::bad_gateway(format!(
                "Your message was saved (reference {contact_id}), but the site owner could \
                 not be notified right now."
            )),
            AppError::RateLimited { retry_after_secs } => {
                ErrorResponse::too_many_requests(*retry_after_secs)
            }
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotificationFailed { .. } => StatusCode::BAD_GATEWAY,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let AppError::RateLimited { retry_after_secs } = self {
            builder.insert_header(("Retry-After", retry_after_secs.to_string()));
        }
        builder
            .content_type("text/html; charset=utf-8")
            .body(error_page(&self.problem()))
    }
}

/// Render the standalone error page, degrading to plain text if that fails.
pub fn error_page(problem: &ErrorResponse) -> String {
    let mut ctx = Context::new();
    ctx.insert("problem", problem);
    Tera::one_off(ERROR_TEMPLATE, &ctx, true).unwrap_or_else(|e| {
        tracing::error!(error = ?e, "Failed to render error page");
        format!("{} {}", problem.status, problem.title)
    })
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, key } => {
                AppError::NotFound(format!("No {entity_type} matches '{key}'."))
            }
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Notification { contact_id, .. } => {
                AppError::NotificationFailed { contact_id }
            }
            DomainError::Session(e) => AppError::Internal(e.to_string()),
            DomainError::Repository(e) => e.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::not_found("post", "missing"), StatusCode::NOT_FOUND),
            (DomainError::Duplicate("slug".into()), StatusCode::CONFLICT),
            (
                DomainError::Notification {
                    contact_id: Uuid::new_v4(),
                    reason: "smtp down".into(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (
                DomainError::Repository(RepoError::Connection("refused".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (domain, status) in cases {
            assert_eq!(AppError::from(domain).status_code(), status);
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::from(RepoError::Query("relation \"posts\" does not exist".into()));
        let html = error_page(&err.problem());
        assert!(html.contains("500 Internal Server Error"));
        assert!(!html.contains("relation"));
    }

    #[test]
    fn test_rate_limited_sets_retry_after() {
        let res = AppError::RateLimited { retry_after_secs: 7 }.error_response();
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(res.headers().get("Retry-After").unwrap(), "7");
    }
}
