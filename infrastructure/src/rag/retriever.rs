//! `Retriever` backed by the LanceDB regulation index

use super::Embedder;
use super::index::VectorIndex;
use async_trait::async_trait;
use corporate_agent_application::ports::retriever::{RetrievalError, Retriever};
use std::sync::Arc;
use tracing::debug;

/// Default passages returned per query
pub const DEFAULT_TOP_K: usize = 4;

pub struct VectorRetriever {
    index: Arc<VectorIndex>,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl VectorRetriever {
    pub fn new(index: Arc<VectorIndex>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            index,
            embedder,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }
}

#[async_trait]
impl Retriever for VectorRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<String>, RetrievalError> {
        let mut vectors = self.embedder.embed(&[query.to_string()]).await?;
        let Some(query_vector) = vectors.pop() else {
            return Err(RetrievalError::EmbeddingFailed(
                "no embedding returned for query".to_string(),
            ));
        };

        let hits = self.index.search(&query_vector, self.top_k).await?;
        debug!(
            hits = hits.len(),
            best = hits.first().map(|h| h.score),
            "Retrieved passages"
        );
        Ok(hits.into_iter().map(|hit| hit.text).collect())
    }
}
