//! Review parameters: orchestrator loop control.
//!
//! [`ReviewParams`] groups the static parameters of
//! [`ReviewDocumentUseCase`](crate::use_cases::review_document::ReviewDocumentUseCase):
//! how documents are segmented and batched, which model reviews them, and
//! how long remote calls may take.

use super::retry_policy::RetryPolicy;
use corporate_agent_domain::{DEFAULT_BATCH_SIZE, DEFAULT_MIN_PARAGRAPH_CHARS, Model};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Author recorded on every inserted comment
pub const DEFAULT_ANNOTATION_AUTHOR: &str = "Corporate Agent";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewParams {
    /// Model used for clause review.
    pub model: Model,
    /// Paragraphs must be longer than this (trimmed, in characters) to be reviewed.
    pub min_paragraph_chars: usize,
    /// Units per model call.
    pub batch_size: usize,
    /// Upper bound for a single retrieval or model call.
    pub call_timeout: Duration,
    pub retry: RetryPolicy,
    /// Author name on inserted comments.
    pub annotation_author: String,
}

impl Default for ReviewParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            min_paragraph_chars: DEFAULT_MIN_PARAGRAPH_CHARS,
            batch_size: DEFAULT_BATCH_SIZE,
            call_timeout: Duration::from_secs(120),
            retry: RetryPolicy::default(),
            annotation_author: DEFAULT_ANNOTATION_AUTHOR.to_string(),
        }
    }
}

impl ReviewParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_min_paragraph_chars(mut self, chars: usize) -> Self {
        self.min_paragraph_chars = chars;
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_annotation_author(mut self, author: impl Into<String>) -> Self {
        self.annotation_author = author.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ReviewParams::default();
        assert_eq!(params.model, Model::Gpt4o);
        assert_eq!(params.min_paragraph_chars, 20);
        assert_eq!(params.batch_size, 2);
        assert_eq!(params.call_timeout, Duration::from_secs(120));
        assert_eq!(params.retry.max_attempts, 3);
        assert_eq!(params.annotation_author, "Corporate Agent");
    }

    #[test]
    fn test_builder() {
        let params = ReviewParams::default()
            .with_batch_size(5)
            .with_min_paragraph_chars(10)
            .with_annotation_author("Reviewer");

        assert_eq!(params.batch_size, 5);
        assert_eq!(params.min_paragraph_chars, 10);
        assert_eq!(params.annotation_author, "Reviewer");
    }
}
