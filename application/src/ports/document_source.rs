//! Document source port
//!
//! Resolves a document location (local path or URL) to its bytes.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while fetching a document
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("HTTP {status} fetching {location}")]
    Http { status: u16, location: String },

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Timed out fetching {0}")]
    Timeout(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads uploaded documents
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError>;
}
