//! Document codec and annotation sink ports
//!
//! A codec turns uploaded bytes into a [`ReviewDocument`]: an ordered list of
//! body paragraphs that can receive comments and be written back out.

use std::path::Path;
use thiserror::Error;

/// Errors raised while reading, annotating or writing a document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("Paragraph {index} out of range (document has {count})")]
    ParagraphOutOfRange { index: usize, count: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Opens uploaded documents
pub trait DocumentCodec: Send + Sync {
    /// Parse `bytes` as the document called `name`
    fn open(&self, name: &str, bytes: Vec<u8>) -> Result<Box<dyn ReviewDocument>, DocumentError>;
}

/// An opened document that collects comments until it is persisted
pub trait ReviewDocument: Send {
    /// Body paragraphs' plain text, in document order
    fn paragraphs(&self) -> &[String];

    /// Attach a comment to the paragraph at `paragraph` (0-based) and
    /// highlight its text.
    ///
    /// Several comments on the same paragraph are all kept.
    fn annotate(&mut self, paragraph: usize, comment: &str, author: &str)
    -> Result<(), DocumentError>;

    /// Number of comments queued so far
    fn annotation_count(&self) -> usize;

    /// Write the annotated document to `path`, creating parent directories
    fn persist(&self, path: &Path) -> Result<(), DocumentError>;
}
