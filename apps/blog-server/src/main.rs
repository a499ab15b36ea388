//! # Blog Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod seed;
mod session;
mod state;
mod telemetry;
mod views;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[cfg(feature = "rate-limit")]
use std::sync::Arc;
#[cfg(feature = "rate-limit")]
use blog_infra::{InMemoryRateLimiter, RateLimitConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!("Starting blog server on {}:{}", config.host, config.port);

    let state = AppState::new(&config)
        .await
        .map_err(std::io::Error::other)?;

    if config.seed_demo_content {
        if state.in_memory {
            if let Err(e) = seed::seed_demo_content(&state.publishing).await {
                tracing::error!(error = %e, "Failed to seed demo content");
            }
        } else {
            tracing::warn!("SEED_DEMO_CONTENT ignored: a database is configured");
        }
    }

    let key = session::session_key(&config.session);
    let cookie_secure = config.session.cookie_secure;
    #[cfg(feature = "rate-limit")]
    let trust_proxy_headers = config.trust_proxy_headers;

    #[cfg(feature = "rate-limit")]
    let limiter: Arc<dyn blog_core::ports::RateLimiter> =
        Arc::new(InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: config.rate_limit_per_minute,
            ..RateLimitConfig::default()
        }));

    HttpServer::new(move || {
        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes);

        #[cfg(feature = "rate-limit")]
        let app = app.wrap(
            middleware::rate_limit::RateLimitMiddleware::new(limiter.clone())
                .trust_proxy_headers(trust_proxy_headers),
        );

        app.wrap(session::session_middleware(key.clone(), cookie_secure))
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
