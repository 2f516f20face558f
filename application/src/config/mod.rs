//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`ReviewParams`]: segmentation, batching, model and call timeouts
//! - [`RetryPolicy`]: backoff for retryable remote failures

pub mod retry_policy;
pub mod review_params;

pub use retry_policy::RetryPolicy;
pub use review_params::{DEFAULT_ANNOTATION_AUTHOR, ReviewParams};
