//! Configuration file loading for corporate-agent
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CORPORATE_AGENT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./corporate-agent.toml` or `./.corporate-agent.toml`
//! 4. Global: `~/.config/corporate-agent/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, FileConfig,
    FileEmbeddingConfig, FileLlmConfig, FileLoggingConfig, FileOutputConfig,
    FileRetrievalConfig, FileRetryConfig, FileReviewConfig, FileSourceConfig, default_sources,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
