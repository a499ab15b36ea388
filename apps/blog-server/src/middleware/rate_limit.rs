//! Rate limiting middleware for form submissions.

use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{
    Error, ResponseError,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
};

use blog_core::ports::{RateLimitDecision, RateLimiter};

use super::error::AppError;

/// Throttles `POST` requests per client address. Other methods pass through.
///
/// The client is the socket peer. `Forwarded` / `X-Forwarded-For` are only
/// consulted when [`RateLimitMiddleware::trust_proxy_headers`] is enabled.
pub struct RateLimitMiddleware {
    limiter: Arc<dyn RateLimiter>,
    trust_proxy_headers: bool,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Arc<dyn RateLimiter>) -> Self {
        Self {
            limiter,
            trust_proxy_headers: false,
        }
    }

    /// Key clients by the forwarded address. Only safe behind a proxy that
    /// overwrites these headers.
    pub fn trust_proxy_headers(mut self, trust: bool) -> Self {
        self.trust_proxy_headers = trust;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
            trust_proxy_headers: self.trust_proxy_headers,
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    limiter: Arc<dyn RateLimiter>,
    trust_proxy_headers: bool,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        if req.method() != Method::POST {
            return Box::pin(async move {
                let res = service.call(req).await?;
                Ok(res.map_into_left_body())
            });
        }

        let limiter = self.limiter.clone();
        let key = client_key(&req, self.trust_proxy_headers);

        Box::pin(async move {
            match limiter.check(&key).await {
                Ok(RateLimitDecision::Limited { retry_after }) => {
                    tracing::warn!(client = %key, path = %req.path(), "Rate limit exceeded");
                    let response = AppError::RateLimited {
                        retry_after_secs: whole_seconds(retry_after),
                    }
                    .error_response();
                    return Ok(req.into_response(response).map_into_right_body());
                }
                Ok(RateLimitDecision::Allowed) => {}
                Err(e) => {
                    // Fail open
                    tracing::error!(error = %e, "Rate limiter error, failing open");
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn client_key(req: &ServiceRequest, trust_proxy_headers: bool) -> String {
    if trust_proxy_headers {
        if let Some(addr) = req.connection_info().realip_remote_addr() {
            return addr.to_string();
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Whole seconds, rounded up, never zero.
fn whole_seconds(wait: Duration) -> u64 {
    let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
    secs.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, web};
    use async_trait::async_trait;
    use blog_core::ports::RateLimitError;
    use blog_infra::{InMemoryRateLimiter, RateLimitConfig};

    struct AlwaysLimited;

    #[async_trait]
    impl RateLimiter for AlwaysLimited {
        async fn check(&self, _key: &str) -> Result<RateLimitDecision, RateLimitError> {
            Ok(RateLimitDecision::Limited {
                retry_after: Duration::from_millis(2500),
            })
        }
    }

    struct Broken;

    #[async_trait]
    impl RateLimiter for Broken {
        async fn check(&self, _key: &str) -> Result<RateLimitDecision, RateLimitError> {
            Err(RateLimitError::Backend("unavailable".into()))
        }
    }

    fn two_per_minute() -> Arc<dyn RateLimiter> {
        Arc::new(InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: 2,
            window: Duration::from_secs(60),
            ..RateLimitConfig::default()
        }))
    }

    fn forwarded_post(peer: &str, forwarded_for: &str) -> actix_test::TestRequest {
        actix_test::TestRequest::post()
            .uri("/form")
            .peer_addr(peer.parse().unwrap())
            .insert_header(("X-Forwarded-For", forwarded_for))
    }

    #[actix_web::test]
    async fn test_limits_posts_but_not_reads() {
        let app = actix_test::init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(Arc::new(AlwaysLimited)))
                .service(
                    web::resource("/form")
                        .route(web::get().to(HttpResponse::Ok))
                        .route(web::post().to(HttpResponse::Ok)),
                ),
        )
        .await;

        let read = actix_test::TestRequest::get().uri("/form").to_request();
        let read = actix_test::call_service(&app, read).await;
        assert_eq!(read.status(), StatusCode::OK);

        let write = actix_test::TestRequest::post().uri("/form").to_request();
        let write = actix_test::call_service(&app, write).await;
        assert_eq!(write.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(write.headers().get("Retry-After").unwrap(), "3");
    }

    #[actix_web::test]
    async fn test_rotating_forwarded_for_does_not_reset_quota() {
        let app = actix_test::init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(two_per_minute()))
                .route("/form", web::post().to(HttpResponse::Ok)),
        )
        .await;

        let mut allowed = 0;
        for i in 0..10 {
            let req = forwarded_post("10.0.0.7:40000", &format!("203.0.113.{i}")).to_request();
            if actix_test::call_service(&app, req).await.status() == StatusCode::OK {
                allowed += 1;
            }
        }

        assert_eq!(allowed, 2);
    }

    #[actix_web::test]
    async fn test_trusted_proxy_headers_key_by_forwarded_client() {
        let app = actix_test::init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(two_per_minute()).trust_proxy_headers(true))
                .route("/form", web::post().to(HttpResponse::Ok)),
        )
        .await;

        let clients = [
            "203.0.113.5",
            "203.0.113.5",
            "203.0.113.5",
            "198.51.100.9",
        ];
        let mut seen = Vec::new();
        for client in clients {
            let req = forwarded_post("10.0.0.1:80", client).to_request();
            seen.push(actix_test::call_service(&app, req).await.status());
        }

        assert_eq!(
            seen,
            [
                StatusCode::OK,
                StatusCode::OK,
                StatusCode::TOO_MANY_REQUESTS,
                StatusCode::OK,
            ]
        );
    }

    #[actix_web::test]
    async fn test_limiter_failure_fails_open() {
        let app = actix_test::init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(Arc::new(Broken)))
                .route("/form", web::post().to(HttpResponse::Ok)),
        )
        .await;

        let req = actix_test::TestRequest::post().uri("/form").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[test]
    fn test_whole_seconds_rounds_up() {
        assert_eq!(whole_seconds(Duration::from_millis(10)), 1);
        assert_eq!(whole_seconds(Duration::from_secs(4)), 4);
        assert_eq!(whole_seconds(Duration::ZERO), 1);
    }
}
