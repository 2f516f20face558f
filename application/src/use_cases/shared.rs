//! Shared utilities for use cases.
//!
//! Contains cancellation checking and the timeout-and-retry wrapper used for
//! every remote call made during a review.

use crate::config::RetryPolicy;
use crate::ports::llm_gateway::GatewayError;
use crate::ports::rate_limiter::RateLimiter;
use crate::ports::retriever::RetrievalError;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Whether cancellation has been requested.
pub(crate) fn is_cancelled(token: &Option<CancellationToken>) -> bool {
    token.as_ref().is_some_and(|t| t.is_cancelled())
}

/// Errors of remote calls that can be retried
pub(crate) trait RemoteCallError: std::fmt::Display {
    fn is_retryable(&self) -> bool;

    /// The error reported when a call exceeds its time budget
    fn timed_out() -> Self;
}

impl RemoteCallError for GatewayError {
    fn is_retryable(&self) -> bool {
        GatewayError::is_retryable(self)
    }

    fn timed_out() -> Self {
        GatewayError::Timeout
    }
}

impl RemoteCallError for RetrievalError {
    fn is_retryable(&self) -> bool {
        RetrievalError::is_retryable(self)
    }

    fn timed_out() -> Self {
        RetrievalError::Timeout
    }
}

/// Run `call` under `call_timeout`, retrying retryable failures with the
/// policy's backoff.
///
/// When a `limiter` is given it is awaited before every attempt, outside
/// the timeout. `on_retry` sees the failed attempt number and its error.
pub(crate) async fn call_with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    call_timeout: Duration,
    limiter: Option<&dyn RateLimiter>,
    mut on_retry: impl FnMut(u32, &E),
    mut call: F,
) -> Result<T, E>
where
    E: RemoteCallError,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        if let Some(limiter) = limiter {
            limiter.acquire().await;
        }

        let result = match tokio::time::timeout(call_timeout, call()).await {
            Ok(result) => result,
            Err(_) => Err(E::timed_out()),
        };

        match result {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                on_retry(attempt, &e);
                tokio::time::sleep(policy.backoff_for(attempt)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_attempts(max_attempts)
            .with_initial_backoff(Duration::from_millis(1))
            .with_max_backoff(Duration::from_millis(5))
    }

    struct CountingLimiter(AtomicU32);

    #[async_trait]
    impl RateLimiter for CountingLimiter {
        async fn acquire(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_is_cancelled() {
        assert!(!is_cancelled(&None));
        let token = CancellationToken::new();
        assert!(!is_cancelled(&Some(token.clone())));
        token.cancel();
        assert!(is_cancelled(&Some(token)));
    }

    #[tokio::test]
    async fn test_retries_retryable_until_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let mut retries = Vec::new();

        let result: Result<&str, GatewayError> = call_with_retry(
            &fast_policy(3),
            Duration::from_secs(1),
            None,
            |attempt, _e| retries.push(attempt),
            move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(GatewayError::RateLimited("slow down".into()))
                } else {
                    Ok("[]")
                }
            },
        )
        .await;

        assert_eq!(result, Ok("[]"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(retries, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let result: Result<(), GatewayError> = call_with_retry(
            &fast_policy(3),
            Duration::from_secs(1),
            None,
            |_, _| {},
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(GatewayError::ConnectionError("reset".into()))
            },
        )
        .await;

        assert!(matches!(result, Err(GatewayError::ConnectionError(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_fatal_error_is_not_retried() {
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let result: Result<(), GatewayError> = call_with_retry(
            &fast_policy(3),
            Duration::from_secs(1),
            None,
            |_, _| {},
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(GatewayError::Authentication("invalid api key".into()))
            },
        )
        .await;

        assert!(matches!(result, Err(GatewayError::Authentication(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_slow_call_times_out() {
        let result: Result<Vec<String>, RetrievalError> = call_with_retry(
            &fast_policy(2),
            Duration::from_millis(10),
            None,
            |_, _| {},
            move || async move {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(vec![])
            },
        )
        .await;

        assert_eq!(result, Err(RetrievalError::Timeout));
    }

    #[tokio::test]
    async fn test_limiter_acquired_before_every_attempt() {
        let limiter = CountingLimiter(AtomicU32::new(0));
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let _: Result<(), GatewayError> = call_with_retry(
            &fast_policy(3),
            Duration::from_secs(1),
            Some(&limiter),
            |_, _| {},
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(GatewayError::Timeout)
            },
        )
        .await;

        assert_eq!(limiter.0.load(Ordering::SeqCst), 3);
    }
}
