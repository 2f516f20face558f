//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod embedding;
mod llm;
mod output;
mod retrieval;
mod review;

pub use embedding::FileEmbeddingConfig;
pub use llm::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, FileLlmConfig};
pub use output::{FileLoggingConfig, FileOutputConfig};
pub use retrieval::{FileRetrievalConfig, FileSourceConfig, default_sources};
pub use review::{FileRetryConfig, FileReviewConfig};

use corporate_agent_application::ReviewParams;
use corporate_agent_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, PartialEq)]
pub enum ConfigValidationError {
    #[error("{0}: model name cannot be empty")]
    EmptyModelName(&'static str),

    #[error("{0} cannot be 0")]
    ZeroValue(&'static str),

    #[error("retrieval.chunk_overlap ({overlap}) must be smaller than retrieval.chunk_size ({size})")]
    OverlapTooLarge { overlap: usize, size: usize },

    #[error("retry.multiplier must be at least 1.0, got {0}")]
    InvalidMultiplier(f64),

    #[error("llm.api_key_env cannot be empty")]
    EmptyApiKeyEnv,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat model settings
    pub llm: FileLlmConfig,
    /// Embedding model settings
    pub embedding: FileEmbeddingConfig,
    /// Regulation sources, splitting and index settings
    pub retrieval: FileRetrievalConfig,
    /// Review loop settings
    pub review: FileReviewConfig,
    /// Backoff for retryable failures
    pub retry: FileRetryConfig,
    /// Report output settings
    pub output: FileOutputConfig,
    /// Log file and transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.llm.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName("llm.model"));
        }
        if self.embedding.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName("embedding.model"));
        }
        if self.llm.api_key_env.trim().is_empty() {
            return Err(ConfigValidationError::EmptyApiKeyEnv);
        }

        let non_zero = [
            ("review.batch_size", self.review.batch_size as u64),
            ("review.call_timeout_secs", self.review.call_timeout_secs),
            ("review.fetch_timeout_secs", self.review.fetch_timeout_secs),
            ("retry.max_attempts", u64::from(self.retry.max_attempts)),
            ("retrieval.chunk_size", self.retrieval.chunk_size as u64),
            ("retrieval.top_k", self.retrieval.top_k as u64),
            (
                "retrieval.download_timeout_secs",
                self.retrieval.download_timeout_secs,
            ),
            ("embedding.batch_size", self.embedding.batch_size as u64),
        ];
        for (field, value) in non_zero {
            if value == 0 {
                return Err(ConfigValidationError::ZeroValue(field));
            }
        }

        if self.retrieval.chunk_overlap >= self.retrieval.chunk_size {
            return Err(ConfigValidationError::OverlapTooLarge {
                overlap: self.retrieval.chunk_overlap,
                size: self.retrieval.chunk_size,
            });
        }

        if !(self.retry.multiplier >= 1.0) {
            return Err(ConfigValidationError::InvalidMultiplier(
                self.retry.multiplier,
            ));
        }

        Ok(())
    }

    /// Chat model as a domain value
    pub fn model(&self) -> Model {
        match self.llm.model.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }

    /// Parameters for the review use case
    pub fn review_params(&self) -> ReviewParams {
        ReviewParams::default()
            .with_model(self.model())
            .with_min_paragraph_chars(self.review.min_paragraph_chars)
            .with_batch_size(self.review.batch_size)
            .with_call_timeout(Duration::from_secs(self.review.call_timeout_secs))
            .with_retry(self.retry.to_policy())
            .with_annotation_author(self.review.annotation_author.clone())
    }

    /// Base URL for embedding requests
    pub fn embedding_base_url(&self) -> &str {
        self.embedding
            .base_url
            .as_deref()
            .unwrap_or(&self.llm.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corporate_agent_domain::OutputFormat;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[llm]
model = "gpt-4o-mini"
temperature = 0.0
min_call_interval_secs = 5

[embedding]
model = "text-embedding-3-large"

[retrieval]
sources_dir = "/srv/adgm"
chunk_size = 800
chunk_overlap = 100
top_k = 6

[[retrieval.sources]]
name = "Annual_Filings.html"
url = "https://example.com/annual"

[review]
batch_size = 4
annotation_author = "Compliance Desk"

[retry]
max_attempts = 5

[output]
format = "json"
color = false
dir = "out"

[logging]
transcript = "transcript.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model(), Model::Gpt4oMini);
        assert_eq!(config.llm.temperature, 0.0);
        assert_eq!(config.llm.min_call_interval_secs, 5);
        assert_eq!(config.embedding.model, "text-embedding-3-large");
        assert_eq!(config.retrieval.sources_dir, PathBuf::from("/srv/adgm"));
        assert_eq!(config.retrieval.top_k, 6);
        assert_eq!(config.retrieval.sources.len(), 1);
        assert_eq!(config.retrieval.sources[0].name, "Annual_Filings.html");
        assert_eq!(config.review.batch_size, 4);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(
            config.logging.transcript,
            Some(PathBuf::from("transcript.jsonl"))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[review]
batch_size = 3
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.review.batch_size, 3);
        // Defaults should apply
        assert_eq!(config.review.min_paragraph_chars, 20);
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.retrieval.sources.len(), 5);
        assert!(config.output.color);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.llm.min_call_interval_secs, 70);
        assert_eq!(config.embedding.model, "text-embedding-3-small");
        assert_eq!(config.retrieval.chunk_size, 1000);
        assert_eq!(config.retrieval.chunk_overlap, 150);
        assert_eq!(config.retrieval.top_k, 4);
        assert_eq!(config.review.call_timeout_secs, 120);
        assert_eq!(config.review.annotation_author, "Corporate Agent");
        assert!(config.output.format.is_none());
        assert!(config.logging.transcript.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_review_params_from_config() {
        let config: FileConfig = toml::from_str(
            r#"
[llm]
model = "my-finetune"

[review]
batch_size = 5
call_timeout_secs = 30

[retry]
max_attempts = 1
"#,
        )
        .unwrap();

        let params = config.review_params();
        assert_eq!(params.model, Model::Custom("my-finetune".to_string()));
        assert_eq!(params.batch_size, 5);
        assert_eq!(params.call_timeout, Duration::from_secs(30));
        assert_eq!(params.retry.max_attempts, 1);
    }

    #[test]
    fn test_embedding_base_url_falls_back_to_llm() {
        let mut config = FileConfig::default();
        assert_eq!(config.embedding_base_url(), DEFAULT_BASE_URL);
        config.embedding.base_url = Some("http://localhost:8080/v1".to_string());
        assert_eq!(config.embedding_base_url(), "http://localhost:8080/v1");
    }

    #[test]
    fn test_validate_zero_batch_size() {
        let config: FileConfig = toml::from_str("[review]\nbatch_size = 0\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ZeroValue("review.batch_size"))
        );
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config: FileConfig = toml::from_str("[review]\ncall_timeout_secs = 0\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ZeroValue("review.call_timeout_secs"))
        );
    }

    #[test]
    fn test_validate_zero_attempts() {
        let config: FileConfig = toml::from_str("[retry]\nmax_attempts = 0\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ZeroValue("retry.max_attempts"))
        );
    }

    #[test]
    fn test_validate_overlap() {
        let config: FileConfig =
            toml::from_str("[retrieval]\nchunk_size = 100\nchunk_overlap = 100\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::OverlapTooLarge {
                overlap: 100,
                size: 100
            })
        );
    }

    #[test]
    fn test_validate_zero_top_k() {
        let config: FileConfig = toml::from_str("[retrieval]\ntop_k = 0\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ZeroValue("retrieval.top_k"))
        );
    }

    #[test]
    fn test_validate_empty_model_name() {
        let config: FileConfig = toml::from_str("[llm]\nmodel = \"  \"\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName("llm.model"))
        );

        let config: FileConfig = toml::from_str("[embedding]\nmodel = \"\"\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName("embedding.model"))
        );
    }
}
