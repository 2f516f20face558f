//! Minimum-interval pacing for model calls

use async_trait::async_trait;
use corporate_agent_application::ports::rate_limiter::RateLimiter;
use governor::{DefaultDirectRateLimiter, Quota};
use std::time::Duration;
use tracing::debug;

/// Spaces successive calls at least `interval` apart.
///
/// Backed by a single-cell GCRA quota, so the first call passes immediately
/// and no bursts accumulate while idle.
pub struct MinIntervalRateLimiter {
    interval: Duration,
    limiter: Option<DefaultDirectRateLimiter>,
}

impl MinIntervalRateLimiter {
    /// A zero interval never waits
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            limiter: Quota::with_period(interval).map(DefaultDirectRateLimiter::direct),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[async_trait]
impl RateLimiter for MinIntervalRateLimiter {
    async fn acquire(&self) {
        let Some(limiter) = &self.limiter else {
            return;
        };
        if limiter.check().is_ok() {
            return;
        }
        debug!(
            interval_ms = self.interval.as_millis() as u64,
            "Waiting before next model call"
        );
        limiter.until_ready().await;
    }
}
