//! Rate limiter port
//!
//! Awaited before every model call so that request pacing is a deployment
//! decision rather than a fixed pause in the review loop.

use async_trait::async_trait;

#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Wait until the next call is allowed
    async fn acquire(&self);
}

/// Limiter that never waits
pub struct Unlimited;

#[async_trait]
impl RateLimiter for Unlimited {
    async fn acquire(&self) {}
}
