//! HTTP handlers and route configuration.

mod contact;
mod health;
mod pages;
mod posts;


use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Unreadable form submission: {err}")).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Unreadable query string: {err}")).into()
    }))
    .route("/", web::get().to(pages::index))
    .route("/profile/", web::get().to(pages::profile))
    .route("/health", web::get().to(health::health_check))
    .route("/posts/", web::get().to(posts::list))
    .service(
        web::resource("/posts/{slug}/")
            .route(web::get().to(posts::detail))
            .route(web::post().to(posts::submit_comment)),
    )
    .service(
        web::resource("/contact/")
            .route(web::get().to(contact::form))
            .route(web::post().to(contact::submit)),
    )
    .default_service(web::to(pages::not_found));
}
