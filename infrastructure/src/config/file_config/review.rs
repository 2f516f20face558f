//! Review loop configuration from TOML (`[review]` and `[retry]` sections)

use corporate_agent_application::{DEFAULT_ANNOTATION_AUTHOR, RetryPolicy};
use corporate_agent_domain::{DEFAULT_BATCH_SIZE, DEFAULT_MIN_PARAGRAPH_CHARS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw review configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReviewConfig {
    /// Paragraphs at or below this trimmed length are not reviewed
    pub min_paragraph_chars: usize,
    /// Clauses per model call
    pub batch_size: usize,
    /// Timeout for one retrieval or model call
    pub call_timeout_secs: u64,
    /// Timeout for downloading an uploaded document
    pub fetch_timeout_secs: u64,
    pub annotation_author: String,
}

impl Default for FileReviewConfig {
    fn default() -> Self {
        Self {
            min_paragraph_chars: DEFAULT_MIN_PARAGRAPH_CHARS,
            batch_size: DEFAULT_BATCH_SIZE,
            call_timeout_secs: 120,
            fetch_timeout_secs: 30,
            annotation_author: DEFAULT_ANNOTATION_AUTHOR.to_string(),
        }
    }
}

/// Raw retry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    /// Attempts per call, including the first
    pub max_attempts: u32,
    pub initial_backoff_secs: u64,
    pub max_backoff_secs: u64,
    pub multiplier: f64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_secs: 2,
            max_backoff_secs: 60,
            multiplier: 2.0,
        }
    }
}

impl FileRetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_attempts(self.max_attempts)
            .with_initial_backoff(Duration::from_secs(self.initial_backoff_secs))
            .with_max_backoff(Duration::from_secs(self.max_backoff_secs))
            .with_multiplier(self.multiplier)
    }
}
