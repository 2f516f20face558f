//! OpenAI-compatible LLM Gateway implementation

use super::client::OpenAiClient;
use super::session::OpenAiSession;
use async_trait::async_trait;
use corporate_agent_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use corporate_agent_domain::Model;
use tracing::info;

/// Default sampling temperature for clause review
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// LLM Gateway backed by a `/chat/completions` endpoint
pub struct OpenAiGateway {
    client: OpenAiClient,
    temperature: f32,
}

impl OpenAiGateway {
    pub fn new(client: OpenAiClient) -> Self {
        info!(base_url = client.base_url(), "OpenAiGateway initialized");
        Self {
            client,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            model.clone(),
            Some(system_prompt.to_string()),
            self.temperature,
        )))
    }
}
