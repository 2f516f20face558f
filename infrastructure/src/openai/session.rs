//! Chat completion session

use super::client::OpenAiClient;
use super::error::OpenAiError;
use super::types::{ChatMessage, ChatRequest, ChatResponse};
use async_trait::async_trait;
use corporate_agent_application::ports::llm_gateway::{GatewayError, LlmSession};
use corporate_agent_domain::Model;
use tracing::debug;

/// A session carrying a model and an optional system prompt.
///
/// Each `send` is a standalone completion; no history is kept.
pub struct OpenAiSession {
    client: OpenAiClient,
    model: Model,
    system_prompt: Option<String>,
    temperature: Option<f32>,
}

impl OpenAiSession {
    pub fn new(
        client: OpenAiClient,
        model: Model,
        system_prompt: Option<String>,
        temperature: f32,
    ) -> Self {
        let temperature = model.supports_temperature().then_some(temperature);
        Self {
            client,
            model,
            system_prompt,
            temperature,
        }
    }

    fn request<'a>(&'a self, content: &'a str) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content,
        });

        ChatRequest {
            model: self.model.as_str(),
            messages,
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let response: ChatResponse = self
            .client
            .post_json("chat/completions", &self.request(content))
            .await?;

        let text = response
            .into_text()
            .ok_or(OpenAiError::EmptyResponse("choices"))?;
        debug!(model = %self.model, bytes = text.len(), "Completion received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenAiClient {
        OpenAiClient::new(reqwest::Client::new(), "http://localhost", "test")
    }

    #[test]
    fn test_request_includes_system_prompt() {
        let session = OpenAiSession::new(
            client(),
            Model::Gpt4o,
            Some("You are an expert ADGM legal assistant.".to_string()),
            0.2,
        );
        let request = session.request("Clause 1");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].content, "Clause 1");
        assert_eq!(request.temperature, Some(0.2));
    }

    #[test]
    fn test_reasoning_model_omits_temperature() {
        let session = OpenAiSession::new(client(), Model::O3Mini, None, 0.2);
        let request = session.request("Clause 1");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.temperature, None);
        assert_eq!(request.model, "o3-mini");
    }
}
