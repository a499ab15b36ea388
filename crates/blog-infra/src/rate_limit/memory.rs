//! In-memory rate limiter using governor crate.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota};

use blog_core::ports::{RateLimitDecision, RateLimitError, RateLimiter};

/// In-memory rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window and client.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
    /// Number of tracked clients above which idle entries are pruned.
    pub max_tracked_keys: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
            max_tracked_keys: 10_000,
        }
    }
}

/// Per-key rate limiter using the GCRA algorithm.
///
/// Note: Limits are per-process, not distributed across instances.
pub struct InMemoryRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    clock: DefaultClock,
    max_tracked_keys: usize,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let burst = NonZeroU32::new(config.max_requests).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(config.window / burst.get())
            .unwrap_or_else(|| Quota::per_minute(burst))
            .allow_burst(burst);

        Self {
            limiter: DefaultKeyedRateLimiter::keyed(quota),
            clock: DefaultClock::default(),
            max_tracked_keys: config.max_tracked_keys,
        }
    }

    /// Clients currently holding limiter state.
    pub fn tracked_keys(&self) -> usize {
        self.limiter.len()
    }

    fn prune_if_needed(&self) {
        if self.limiter.len() > self.max_tracked_keys {
            self.limiter.retain_recent();
            self.limiter.shrink_to_fit();
            tracing::debug!(remaining = self.limiter.len(), "Pruned idle rate limit keys");
        }
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitDecision, RateLimitError> {
        let decision = match self.limiter.check_key(&key.to_string()) {
            Ok(_) => RateLimitDecision::Allowed,
            Err(not_until) => RateLimitDecision::Limited {
                retry_after: not_until.wait_time_from(self.clock.now()),
            },
        };
        self.prune_if_needed();
        Ok(decision)
    }
}
