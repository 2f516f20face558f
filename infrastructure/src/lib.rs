//! Infrastructure layer for corporate-agent
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the OpenAI-compatible chat and embedding
//! clients, the `.docx` codec, the regulation vector index, document
//! fetching and configuration file loading.

pub mod config;
pub mod docx;
pub mod fetch;
pub mod logging;
pub mod openai;
pub mod rag;
pub mod rate_limit;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use docx::{DocxCodec, DocxDocument, DocxError};
pub use fetch::{DocumentFetcher, html_to_text, http_client};
pub use logging::JsonlConversationLogger;
pub use openai::{OpenAiClient, OpenAiEmbedder, OpenAiError, OpenAiGateway};
pub use rag::{Embedder, IndexBuilder, IndexError, TextSplitter, VectorIndex, VectorRetriever};
pub use rate_limit::MinIntervalRateLimiter;
