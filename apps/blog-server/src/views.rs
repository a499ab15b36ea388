//! Page rendering: the template set and domain → view model conversions.

use actix_web::{HttpResponse, http::StatusCode};
use tera::{Context, Tera};

use blog_core::domain::{Comment, Post};
use blog_core::pagination::Page;
use blog_shared::{CommentView, PaginationView, PostView};

use crate::middleware::error::{AppError, AppResult};

/// Templates compiled into the binary.
const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("_post_card.html", include_str!("../templates/_post_card.html")),
    ("_field_errors.html", include_str!("../templates/_field_errors.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("post_list.html", include_str!("../templates/post_list.html")),
    ("post_detail.html", include_str!("../templates/post_detail.html")),
    ("contact.html", include_str!("../templates/contact.html")),
    ("profile.html", include_str!("../templates/profile.html")),
];

/// Standalone error page, rendered without access to the template set.
pub const ERROR_TEMPLATE: &str = include_str!("../templates/error.html");

pub fn build_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES.iter().copied())?;
    Ok(tera)
}

pub fn render(tera: &Tera, template: &str, ctx: &Context) -> AppResult<HttpResponse> {
    render_with_status(tera, template, ctx, StatusCode::OK)
}

pub fn render_with_status(
    tera: &Tera,
    template: &str,
    ctx: &Context,
    status: StatusCode,
) -> AppResult<HttpResponse> {
    let body = tera.render(template, ctx).map_err(|e| {
        AppError::Internal(format!("rendering {template}: {e:?}"))
    })?;
    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body))
}

/// `303 See Other` to `location`, the post/redirect/get answer to a form.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

pub fn post_url(slug: &str) -> String {
    format!("/posts/{slug}/")
}

pub fn post_view(post: &Post) -> PostView {
    PostView {
        id: post.id.to_string(),
        title: post.title.clone(),
        slug: post.slug.clone(),
        body: post.body.clone(),
        tags: post.tag_list().into_iter().map(str::to_string).collect(),
        url: post_url(&post.slug),
        published_on: post.created_at.format("%Y-%m-%d").to_string(),
    }
}

pub fn post_views(posts: &[Post]) -> Vec<PostView> {
    posts.iter().map(post_view).collect()
}

pub fn comment_view(comment: &Comment) -> CommentView {
    CommentView {
        name: comment.name.clone(),
        body: comment.body.clone(),
        posted_at: comment.created_at.format("%Y-%m-%d %H:%M").to_string(),
    }
}

pub fn pagination_view<T>(page: &Page<T>) -> PaginationView {
    PaginationView {
        number: page.number,
        total_pages: page.total_pages,
        total_items: page.total_items,
        has_next: page.has_next(),
        has_previous: page.has_previous(),
        next: page.next_number(),
        previous: page.previous_number(),
    }
}
