//! Rate limiting port.

use async_trait::async_trait;
use std::time::Duration;

/// Rate limiter trait - abstraction over rate limiting backends.
///
/// Keys are client identities (originating network address, or a sentinel
/// for unknown origin). Implementations must make the check-and-count step
/// atomic per key.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Check whether a request from `key` is allowed and update the counter.
    async fn check(&self, key: &str) -> Result<RateLimitDecision, RateLimitError>;
}

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request is allowed.
    Allowed {
        /// Requests left in the current window.
        remaining: u32,
        /// Time until the window resets.
        reset_in: Duration,
    },
    /// Request is rejected.
    Limited {
        /// Time until the client may retry.
        retry_after: Duration,
    },
}

/// Rate limit errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),
}
