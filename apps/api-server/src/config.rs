//! Application configuration loaded from environment variables.
//!
//! Everything a component needs is carried here explicitly; no component
//! reads the environment on its own.

use std::env;
use std::time::Duration;

use blog_infra::RateLimitConfig;

#[cfg(feature = "postgres")]
use blog_infra::DatabaseConfig;

/// Fallback secret for local development only.
const DEV_API_SECRET: &str = "change-me-in-production";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Shared secret checked against the `X-API-Key` header on mutations.
    pub api_secret: String,
    /// CORS allow-list; requests from other origins get the `null` marker.
    pub allowed_origins: Vec<String>,
    pub rate_limit: RateLimitConfig,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let api_secret = env::var("API_SECRET").unwrap_or_else(|_| {
            tracing::warn!("API_SECRET not set - using the development default");
            DEV_API_SECRET.to_string()
        });

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let rate_limit_defaults = RateLimitConfig::default();
        let rate_limit = RateLimitConfig {
            max_requests: env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(rate_limit_defaults.max_requests),
            window: Duration::from_secs(
                env::var("RATE_LIMIT_WINDOW_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(rate_limit_defaults.window.as_secs()),
            ),
        };

        #[cfg(feature = "postgres")]
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            api_secret,
            allowed_origins,
            rate_limit,
            #[cfg(feature = "postgres")]
            database,
        }
    }
}
