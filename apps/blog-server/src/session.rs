//! Session wrapper so handlers and pipelines only see boolean flags.

use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures::future::LocalBoxFuture;

use blog_core::ports::{SessionError, SessionState};

use crate::config::SessionConfig;

pub const SESSION_COOKIE: &str = "session";

/// Cookie key from `SESSION_SECRET`, or a per-process key when none is usable.
pub fn session_key(config: &SessionConfig) -> Key {
    if let Some(secret) = &config.secret {
        match Key::try_from(secret.as_slice()) {
            Ok(key) => return key,
            Err(e) => tracing::warn!(error = %e, "SESSION_SECRET rejected"),
        }
    }
    tracing::warn!("Generating an ephemeral session key; sessions end on restart");
    Key::generate()
}

/// Signed and encrypted cookie sessions.
pub fn session_middleware(key: Key, cookie_secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build()
}

/// Newtype over the cookie-backed Actix session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }
}

impl SessionState for SessionContext {
    fn get(&self, key: &str) -> Result<Option<bool>, SessionError> {
        self.0
            .get::<bool>(key)
            .map_err(|e| SessionError::Read(e.to_string()))
    }

    fn set(&self, key: &str, value: bool) -> Result<(), SessionError> {
        self.0
            .insert(key, value)
            .map_err(|e| SessionError::Write(e.to_string()))
    }

    fn pop(&self, key: &str) -> Result<Option<bool>, SessionError> {
        match self.0.remove_as::<bool>(key) {
            None => Ok(None),
            Some(Ok(value)) => Ok(Some(value)),
            Some(Err(raw)) => {
                tracing::warn!(key, raw = %raw, "Discarding malformed session value");
                Ok(None)
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::test_session_middleware;
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, web};

    #[test]
    fn test_short_or_missing_secret_still_yields_a_key() {
        let missing = SessionConfig {
            secret: None,
            cookie_secure: false,
        };
        let short = SessionConfig {
            secret: Some(b"too-short".to_vec()),
            cookie_secure: false,
        };
        let long = SessionConfig {
            secret: Some(vec![7u8; 64]),
            cookie_secure: false,
        };

        assert_eq!(session_key(&missing).master().len(), 64);
        assert_eq!(session_key(&short).master().len(), 64);
        assert_eq!(session_key(&long).master(), session_key(&long).master());
    }

    #[actix_web::test]
    async fn test_flag_survives_cookie_round_trip_once() {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/raise",
                    web::get().to(|session: SessionContext| async move {
                        session
                            .set("seen", true)
                            .map_err(actix_web::error::ErrorInternalServerError)?;
                        Ok::<_, actix_web::Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/take",
                    web::get().to(|session: SessionContext| async move {
                        let seen = session
                            .pop("seen")
                            .map_err(actix_web::error::ErrorInternalServerError)?
                            .unwrap_or(false);
                        Ok::<_, actix_web::Error>(HttpResponse::Ok().body(seen.to_string()))
                    }),
                ),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/raise").to_request();
        let raised = actix_test::call_service(&app, req).await;
        assert_eq!(raised.status(), StatusCode::OK);
        let cookie = raised
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("session cookie set")
            .into_owned();

        let taken = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/take")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let updated = taken
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.into_owned());
        assert_eq!(actix_test::read_body(taken).await, "true");

        let mut retry = actix_test::TestRequest::get().uri("/take");
        if let Some(cookie) = updated {
            retry = retry.cookie(cookie);
        }
        let again = actix_test::call_service(&app, retry.to_request()).await;
        assert_eq!(actix_test::read_body(again).await, "false");
    }
}
