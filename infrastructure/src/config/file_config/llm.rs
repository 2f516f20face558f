//! Chat model configuration from TOML (`[llm]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Raw chat model configuration
///
/// # Example
///
/// ```toml
/// [llm]
/// model = "gpt-4o"
/// temperature = 0.2
/// base_url = "https://api.openai.com/v1"
/// api_key_env = "OPENAI_API_KEY"
/// min_call_interval_secs = 70
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Chat model used for clause review
    pub model: String,
    pub temperature: f32,
    /// Root of an OpenAI-compatible API
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Minimum spacing between model calls; 0 disables pacing
    pub min_call_interval_secs: u64,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.2,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            min_call_interval_secs: 70,
        }
    }
}
