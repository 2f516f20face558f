//! Error types for the DOCX codec

use corporate_agent_application::ports::document::DocumentError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocxError>;

/// Errors raised while reading or writing a WordprocessingML package
#[derive(Error, Debug)]
pub enum DocxError {
    #[error("Not a valid zip package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Missing package part: {0}")]
    MissingPart(&'static str),

    #[error("Invalid XML in {part}: {message}")]
    Xml { part: &'static str, message: String },

    #[error("Part {0} is not UTF-8")]
    Encoding(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocxError {
    pub(crate) fn xml(part: &'static str, e: impl std::fmt::Display) -> Self {
        DocxError::Xml {
            part,
            message: e.to_string(),
        }
    }
}

impl From<DocxError> for DocumentError {
    fn from(e: DocxError) -> Self {
        match e {
            DocxError::Io(io) => DocumentError::Io(io),
            other => DocumentError::Malformed(other.to_string()),
        }
    }
}
