//! Application state - shared across all handlers.

use std::sync::Arc;

use tera::Tera;

use blog_core::ports::{
    CommentRepository, ContactRepository, Notifier, PostRepository, UserRepository,
};
use blog_core::services::{
    CommentPipeline, ContactPipeline, ContactSettings, PostQueryService, PublishingService,
};
use blog_infra::{InMemoryStore, MailboxNotifier};

#[cfg(feature = "postgres")]
use blog_infra::DatabasePool;
#[cfg(feature = "postgres")]
use blog_infra::database::{
    PostgresCommentRepository, PostgresContactRepository, PostgresPostRepository,
    PostgresUserRepository,
};
#[cfg(feature = "mail")]
use blog_infra::{SmtpConfig, SmtpNotifier};

use crate::config::AppConfig;
use crate::views;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub query: PostQueryService,
    pub comments: CommentPipeline,
    pub contact: ContactPipeline,
    pub publishing: PublishingService,
    pub templates: Arc<Tera>,
    /// True when content lives in the process-local store.
    pub in_memory: bool,
}

/// One handle per repository port.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub contacts: Arc<dyn ContactRepository>,
}

impl Repositories {
    /// Every port backed by one shared in-memory store.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: store.clone(),
            posts: store.clone(),
            comments: store.clone(),
            contacts: store,
        }
    }

    #[cfg(feature = "postgres")]
    pub fn postgres(pool: &DatabasePool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.conn.clone())),
            posts: Arc::new(PostgresPostRepository::new(pool.conn.clone())),
            comments: Arc::new(PostgresCommentRepository::new(pool.conn.clone())),
            contacts: Arc::new(PostgresContactRepository::new(pool.conn.clone())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("template set failed to compile: {0}")]
    Templates(#[from] tera::Error),
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let (repos, in_memory) = Self::repositories(config).await;
        let notifier = build_notifier(config);

        let mut state = Self::assemble(repos, notifier, config.contact.clone())?;
        state.in_memory = in_memory;

        tracing::info!(in_memory, "Application state initialized");
        Ok(state)
    }

    /// Wire services over the given adapters.
    pub fn assemble(
        repos: Repositories,
        notifier: Arc<dyn Notifier>,
        contact: ContactSettings,
    ) -> Result<Self, StartupError> {
        let query = PostQueryService::new(repos.posts.clone());
        let comments = CommentPipeline::new(query.clone(), repos.comments.clone());
        let contact = ContactPipeline::new(repos.contacts.clone(), notifier, contact);
        let publishing =
            PublishingService::new(repos.users, repos.posts, repos.comments, repos.contacts);

        Ok(Self {
            query,
            comments,
            contact,
            publishing,
            templates: Arc::new(views::build_templates()?),
            in_memory: true,
        })
    }

    #[cfg(feature = "postgres")]
    async fn repositories(config: &AppConfig) -> (Repositories, bool) {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return (Repositories::in_memory(), true);
        };

        match DatabasePool::connect(db_config).await {
            Ok(pool) => (Repositories::postgres(&pool), false),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                (Repositories::in_memory(), true)
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(config: &AppConfig) -> (Repositories, bool) {
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }
        tracing::info!("Running without postgres feature - using in-memory repository");
        (Repositories::in_memory(), true)
    }
}

/// SMTP when configured and usable, otherwise the log-only mailbox.
fn build_notifier(config: &AppConfig) -> Arc<dyn Notifier> {
    #[cfg(feature = "mail")]
    if let Some(smtp) = &config.smtp {
        let smtp_config = SmtpConfig {
            host: smtp.host.clone(),
            port: smtp.port,
            username: smtp.username.clone(),
            password: smtp.password.clone(),
            from: smtp.from.clone(),
            timeout: smtp.timeout,
        };
        match SmtpNotifier::new(&smtp_config) {
            Ok(notifier) => return Arc::new(notifier),
            Err(e) => tracing::error!(
                error = %e,
                "Invalid SMTP settings, contact messages will only be logged"
            ),
        }
    }

    #[cfg(not(feature = "mail"))]
    if config.smtp.is_some() {
        tracing::warn!("SMTP_HOST ignored: built without the mail feature");
    }

    tracing::info!("Using log-only mailbox for contact notifications");
    Arc::new(MailboxNotifier::new())
}
