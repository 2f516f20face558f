//! Embedding model configuration from TOML (`[embedding]` section)

use serde::{Deserialize, Serialize};

/// Raw embedding configuration
///
/// The endpoint and API key are shared with `[llm]` unless `base_url` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEmbeddingConfig {
    pub model: String,
    /// Overrides `llm.base_url` for embedding requests
    pub base_url: Option<String>,
    /// Texts per embedding request
    pub batch_size: usize,
}

impl Default for FileEmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            base_url: None,
            batch_size: 64,
        }
    }
}
