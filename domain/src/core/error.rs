//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No documents to analyze")]
    NoDocuments,

    #[error("Invalid document name: {0}")]
    InvalidDocumentName(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}

/// Validate a declared document name and return it trimmed.
///
/// Names become output filenames (`REVIEWED_<name>`), so they must be a
/// single non-empty path component.
pub fn validate_document_name(name: &str) -> Result<&str, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
    {
        return Err(DomainError::InvalidDocumentName(name.to_string()));
    }
    Ok(trimmed)
}
