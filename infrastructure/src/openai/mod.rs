//! OpenAI-compatible HTTP adapter
//!
//! Implements the [`LlmGateway`](corporate_agent_application::LlmGateway)
//! port over `/chat/completions` and the retrieval pipeline's
//! [`Embedder`](crate::rag::Embedder) over `/embeddings`.

mod client;
mod embeddings;
mod error;
mod gateway;
mod session;
mod types;

pub use client::OpenAiClient;
pub use embeddings::{DEFAULT_EMBEDDING_MODEL, OpenAiEmbedder};
pub use error::OpenAiError;
pub use gateway::{DEFAULT_TEMPERATURE, OpenAiGateway};
pub use session::OpenAiSession;
