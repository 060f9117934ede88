//! In-memory fixed-window rate limiter.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use blog_core::ports::{RateLimitDecision, RateLimitError, RateLimiter};

/// Fixed-window limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 60,
            window: Duration::from_secs(60),
        }
    }
}

/// Per-identity window state.
#[derive(Debug)]
struct RateWindow {
    count: u32,
    started_at: Instant,
}

/// In-memory fixed-window rate limiter, keyed by client identity.
///
/// The map lives for the process only: limits reset on restart, and in a
/// horizontally scaled deployment each instance counts independently, so
/// this is a best-effort single-instance limiter. A fixed window also
/// admits up to 2x the cap across a window boundary; that is accepted
/// behavior of the algorithm, not a defect.
///
/// The whole check-and-count step runs under one async mutex, so the window
/// contract holds under concurrent requests for the same identity. Stale
/// windows of other identities are swept on every check to bound memory.
pub struct FixedWindowLimiter {
    windows: Mutex<HashMap<String, RateWindow>>,
    config: RateLimitConfig,
}

impl FixedWindowLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Check-and-count against an explicit clock value. Tests drive this
    /// directly to simulate window elapse without sleeping.
    async fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        let window_len = self.config.window;
        let mut windows = self.windows.lock().await;

        // Best-effort sweep of stale entries; the current key is handled
        // by the reset below either way.
        windows.retain(|k, w| k == key || now.duration_since(w.started_at) <= window_len);

        let window = windows.entry(key.to_string()).or_insert(RateWindow {
            count: 0,
            started_at: now,
        });

        if now.duration_since(window.started_at) > window_len {
            window.count = 0;
            window.started_at = now;
        }

        window.count += 1;
        let elapsed = now.duration_since(window.started_at);
        let reset_in = window_len.saturating_sub(elapsed);

        if window.count > self.config.max_requests {
            RateLimitDecision::Limited {
                retry_after: reset_in,
            }
        } else {
            RateLimitDecision::Allowed {
                remaining: self.config.max_requests - window.count,
                reset_in,
            }
        }
    }
}

#[async_trait]
impl RateLimiter for FixedWindowLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitDecision, RateLimitError> {
        Ok(self.check_at(key, Instant::now()).await)
    }
}
