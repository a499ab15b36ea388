//! Post list, post detail and comment submission.

use actix_web::{HttpResponse, http::StatusCode, web};
use tera::Context;

use blog_core::domain::{Post, PostFilter};
use blog_core::services::POSTS_PER_PAGE;
use blog_core::validation::CommentInput;
use blog_core::{DomainError, FieldErrors};
use blog_shared::{CommentForm, PostListParams};

use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{
    comment_view, pagination_view, post_url, post_view, post_views, render, render_with_status,
    see_other,
};

/// GET /posts/?q=&tag=&page=
pub async fn list(
    state: web::Data<AppState>,
    params: web::Query<PostListParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let filter = PostFilter::new(params.q.as_deref(), params.tag.as_deref());
    let number = params.page_number();

    let page = state
        .query
        .list_published(&filter, number, POSTS_PER_PAGE)
        .await?;

    tracing::debug!(
        page = number,
        total_items = page.total_items,
        filtered = !filter.is_empty(),
        "Listing posts"
    );

    let mut ctx = Context::new();
    ctx.insert("posts", &post_views(&page.items));
    ctx.insert("page", &pagination_view(&page));
    ctx.insert("query", &params.q.unwrap_or_default());
    ctx.insert("tag", &params.tag.unwrap_or_default());
    render(&state.templates, "post_list.html", &ctx)
}

/// GET /posts/{slug}/
pub async fn detail(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.query.get_published_by_slug(&slug).await?;
    render_detail(
        &state,
        &post,
        &CommentForm::default(),
        &FieldErrors::new(),
        StatusCode::OK,
    )
    .await
}

/// POST /posts/{slug}/
pub async fn submit_comment(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let input = CommentInput::new(&form.name, &form.email, &form.body);

    match state.comments.submit_comment(&slug, input).await {
        Ok(_) => Ok(see_other(&post_url(&slug))),
        Err(DomainError::Validation(errors)) => {
            tracing::debug!(post_slug = %slug, fields = %errors, "Comment rejected");
            let post = state.query.get_published_by_slug(&slug).await?;
            render_detail(
                &state,
                &post,
                &form,
                &errors,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await
        }
        Err(e) => Err(e.into()),
    }
}

async fn render_detail(
    state: &AppState,
    post: &Post,
    form: &CommentForm,
    errors: &FieldErrors,
    status: StatusCode,
) -> AppResult<HttpResponse> {
    let comments = state.comments.visible_comments(post.id).await?;

    let mut ctx = Context::new();
    ctx.insert("post", &post_view(post));
    ctx.insert(
        "comments",
        &comments.iter().map(comment_view).collect::<Vec<_>>(),
    );
    ctx.insert("form", form);
    ctx.insert("errors", errors);
    render_with_status(&state.templates, "post_detail.html", &ctx, status)
}
