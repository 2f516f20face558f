//! Retrieval port
//!
//! Supplies regulatory context for a batch of clauses.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while retrieving context
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetrievalError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Embedding request failed: {0}")]
    EmbeddingFailed(String),

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Index error: {0}")]
    Index(String),

    #[error("Timeout")]
    Timeout,
}

impl RetrievalError {
    /// Whether repeating the same query may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RetrievalError::ConnectionError(_)
                | RetrievalError::RateLimited(_)
                | RetrievalError::ServerError { .. }
                | RetrievalError::Timeout
        )
    }
}

/// Source of regulation passages relevant to a query
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Return passages ordered by decreasing relevance.
    ///
    /// An empty result is valid; the review then proceeds without context.
    async fn retrieve(&self, query: &str) -> Result<Vec<String>, RetrievalError>;
}
