use corporate_agent_application::ports::retriever::RetrievalError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building, opening or searching the regulation index
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Vector store error: {0}")]
    Store(#[from] lancedb::Error),

    #[error("Invalid record batch: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    #[error("Search result is missing column '{0}'")]
    Column(&'static str),

    #[error("Embedding dimension mismatch: expected {expected}, found {found}")]
    Dimension { expected: usize, found: usize },

    #[error("No chunks to index")]
    Empty,

    #[error("No regulation documents could be loaded from {0}")]
    NoDocuments(PathBuf),

    #[error("Embedding failed: {0}")]
    Embedding(#[from] RetrievalError),

    #[error("Loader task failed: {0}")]
    Task(String),
}

impl IndexError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IndexError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<IndexError> for RetrievalError {
    fn from(e: IndexError) -> Self {
        match e {
            IndexError::Embedding(inner) => inner,
            other => RetrievalError::Index(other.to_string()),
        }
    }
}
