//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::auth::ApiKeyAuthenticator;
use blog_core::ports::{CategoryRepository, CommentRepository, PostRepository, RateLimiter};
use blog_core::validate::RequestValidator;
use blog_infra::{FixedWindowLimiter, InMemoryCategories, InMemoryComments, InMemoryPosts};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub limiter: Arc<dyn RateLimiter>,
    pub authenticator: Arc<ApiKeyAuthenticator>,
    pub validator: RequestValidator,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let limiter: Arc<dyn RateLimiter> =
            Arc::new(FixedWindowLimiter::new(config.rate_limit.clone()));
        let authenticator = Arc::new(ApiKeyAuthenticator::new(config.api_secret.clone()));

        #[cfg(feature = "postgres")]
        let (posts, categories, comments) = Self::repositories(config).await;

        #[cfg(not(feature = "postgres"))]
        let (posts, categories, comments) = {
            tracing::info!("Built without postgres feature - using in-memory repositories");
            Self::memory_repositories()
        };

        tracing::info!("Application state initialized");

        Self {
            posts,
            categories,
            comments,
            limiter,
            authenticator,
            validator: RequestValidator::new(),
        }
    }

    #[cfg(feature = "postgres")]
    async fn repositories(
        config: &AppConfig,
    ) -> (
        Arc<dyn PostRepository>,
        Arc<dyn CategoryRepository>,
        Arc<dyn CommentRepository>,
    ) {
        use blog_infra::{PostgresCategories, PostgresComments, PostgresPosts, connect};

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set - running with in-memory repositories");
            return Self::memory_repositories();
        };

        match connect(db_config).await {
            Ok(db) => (
                Arc::new(PostgresPosts::new(db.clone())),
                Arc::new(PostgresCategories::new(db.clone())),
                Arc::new(PostgresComments::new(db)),
            ),
            Err(e) => {
                tracing::error!("Failed to connect to database: {e}. Using in-memory fallback.");
                Self::memory_repositories()
            }
        }
    }

    fn memory_repositories() -> (
        Arc<dyn PostRepository>,
        Arc<dyn CategoryRepository>,
        Arc<dyn CommentRepository>,
    ) {
        (
            Arc::new(InMemoryPosts::new()),
            Arc::new(InMemoryCategories::default()),
            Arc::new(InMemoryComments::new()),
        )
    }
}
