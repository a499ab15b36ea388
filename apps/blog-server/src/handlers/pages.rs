//! Home, profile and fallback pages.

use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use tera::Context;

use blog_core::services::RECENT_POSTS_LIMIT;
use blog_shared::ErrorResponse;

use crate::middleware::error::{AppResult, error_page};
use crate::observability::RequestId;
use crate::state::AppState;
use crate::views::{post_views, render};

/// GET /
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.query.list_recent_published(RECENT_POSTS_LIMIT).await?;

    let mut ctx = Context::new();
    ctx.insert("posts", &post_views(&posts));
    render(&state.templates, "index.html", &ctx)
}

/// GET /profile/
pub async fn profile(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render(&state.templates, "profile.html", &Context::new())
}

/// Anything no route claims.
pub async fn not_found(req: HttpRequest, request_id: RequestId) -> HttpResponse {
    let problem = ErrorResponse::not_found("There is no page at this address.")
        .with_instance(req.path())
        .with_request_id(request_id.as_str());

    HttpResponse::build(StatusCode::NOT_FOUND)
        .content_type("text/html; charset=utf-8")
        .body(error_page(&problem))
}
