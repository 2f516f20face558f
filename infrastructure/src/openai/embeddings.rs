//! Embedding client for the `/embeddings` endpoint

use super::client::OpenAiClient;
use super::error::OpenAiError;
use super::types::{EmbeddingRequest, EmbeddingResponse};
use crate::rag::Embedder;
use async_trait::async_trait;
use corporate_agent_application::ports::retriever::RetrievalError;
use tracing::debug;

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Embeds texts in fixed-size request batches
pub struct OpenAiEmbedder {
    client: OpenAiClient,
    model: String,
    batch_size: usize,
}

impl OpenAiEmbedder {
    pub fn new(client: OpenAiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            batch_size: 64,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        let mut vectors = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(self.batch_size) {
            let request = EmbeddingRequest {
                model: &self.model,
                input: chunk,
            };
            let response: EmbeddingResponse = self.client.post_json("embeddings", &request).await?;
            let batch = response.into_vectors();
            if batch.len() != chunk.len() {
                return Err(OpenAiError::ParseError(format!(
                    "expected {} embeddings, got {}",
                    chunk.len(),
                    batch.len()
                ))
                .into());
            }
            debug!(count = batch.len(), "Embedded batch");
            vectors.extend(batch);
        }

        Ok(vectors)
    }
}
