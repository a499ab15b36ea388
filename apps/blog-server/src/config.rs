//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use blog_core::services::ContactSettings;
use blog_infra::database::DatabaseConfig;

/// Minimum length of `SESSION_SECRET` accepted as a cookie key.
pub const SESSION_SECRET_MIN_LEN: usize = 64;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub session: SessionConfig,
    pub smtp: Option<SmtpSettings>,
    pub contact: ContactSettings,
    pub rate_limit_per_minute: u32,
    /// Key rate limits on `Forwarded` / `X-Forwarded-For` instead of the peer.
    pub trust_proxy_headers: bool,
    pub seed_demo_content: bool,
}

/// Cookie session settings.
#[derive(Clone)]
pub struct SessionConfig {
    /// Signing/encryption key material; `None` means generate one per process.
    pub secret: Option<Vec<u8>>,
    pub cookie_secure: bool,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

/// SMTP relay settings; present only when `SMTP_HOST` is set.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut config = DatabaseConfig::new(url);
            config.max_connections = parse_or("DB_MAX_CONNECTIONS", 20);
            config.min_connections = parse_or("DB_MIN_CONNECTIONS", 2);
            config
        });

        let secret = env::var("SESSION_SECRET").ok().and_then(|raw| {
            if raw.len() >= SESSION_SECRET_MIN_LEN {
                Some(raw.into_bytes())
            } else {
                tracing::warn!(
                    length = raw.len(),
                    min = SESSION_SECRET_MIN_LEN,
                    "SESSION_SECRET too short, ignoring it"
                );
                None
            }
        });

        let smtp = env::var("SMTP_HOST").ok().map(|host| SmtpSettings {
            host,
            port: parse_or("SMTP_PORT", 587),
            username: env::var("SMTP_USERNAME").ok(),
            password: env::var("SMTP_PASSWORD").ok(),
            from: env::var("MAIL_FROM").unwrap_or_else(|_| "Blog <noreply@localhost>".to_string()),
            timeout: Duration::from_secs(parse_or("SMTP_TIMEOUT_SECS", 10)),
        });

        let defaults = ContactSettings::default();
        let contact = ContactSettings {
            recipient: env::var("CONTACT_RECIPIENT").unwrap_or(defaults.recipient),
            subject_tag: env::var("CONTACT_SUBJECT_TAG").unwrap_or(defaults.subject_tag),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 8080),
            database,
            session: SessionConfig {
                secret,
                cookie_secure: flag("COOKIE_SECURE"),
            },
            smtp,
            contact,
            rate_limit_per_minute: parse_or("RATE_LIMIT_PER_MINUTE", 10),
            trust_proxy_headers: flag("TRUST_PROXY_HEADERS"),
            seed_demo_content: flag("SEED_DEMO_CONTENT"),
        }
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn flag(key: &str) -> bool {
    env::var(key)
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}
