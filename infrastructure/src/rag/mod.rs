//! Retrieval over ADGM regulation documents
//!
//! Sources are downloaded once into a local directory, split into
//! overlapping chunks, embedded and stored in an embedded LanceDB table.
//! Queries are embedded with the same model and answered by cosine distance.

mod builder;
mod error;
mod index;
mod loader;
mod retriever;
mod sources;
mod splitter;

pub use builder::IndexBuilder;
pub use error::IndexError;
pub use index::{IndexEntry, ScoredChunk, VectorIndex};
pub use loader::{SourceText, load_directory};
pub use retriever::{DEFAULT_TOP_K, VectorRetriever};
pub use sources::{RegulationSource, download_missing};
pub use splitter::TextSplitter;

use async_trait::async_trait;
use corporate_agent_application::ports::retriever::RetrievalError;

/// Turns texts into embedding vectors, one per input, in order
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError>;
}
