//! Error types for the OpenAI-compatible adapter

use corporate_agent_application::ports::llm_gateway::GatewayError;
use corporate_agent_application::ports::retriever::RetrievalError;
use thiserror::Error;

/// Result type alias for OpenAI API operations
pub type Result<T> = std::result::Result<T, OpenAiError>;

/// Errors that can occur when calling an OpenAI-compatible API
#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Response contained no {0}")]
    EmptyResponse(&'static str),
}

impl From<reqwest::Error> for OpenAiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            OpenAiError::Timeout
        } else if e.is_connect() {
            OpenAiError::Connection(e.to_string())
        } else if e.is_decode() {
            OpenAiError::ParseError(e.to_string())
        } else {
            OpenAiError::Request(e.to_string())
        }
    }
}

impl From<OpenAiError> for GatewayError {
    fn from(e: OpenAiError) -> Self {
        match e {
            OpenAiError::Http { status: 429, message } => GatewayError::RateLimited(message),
            OpenAiError::Http {
                status: 401 | 403,
                message,
            } => GatewayError::Authentication(message),
            OpenAiError::Http { status: 404, message } => GatewayError::ModelNotAvailable(message),
            OpenAiError::Http { status, message } if status >= 500 => {
                GatewayError::ServerError { status, message }
            }
            OpenAiError::Http { status, message } => {
                GatewayError::RequestFailed(format!("HTTP {}: {}", status, message))
            }
            OpenAiError::Timeout => GatewayError::Timeout,
            OpenAiError::Connection(message) => GatewayError::ConnectionError(message),
            other => GatewayError::RequestFailed(other.to_string()),
        }
    }
}

impl From<OpenAiError> for RetrievalError {
    fn from(e: OpenAiError) -> Self {
        match e {
            OpenAiError::Http { status: 429, message } => RetrievalError::RateLimited(message),
            OpenAiError::Http { status, message } if status >= 500 => {
                RetrievalError::ServerError { status, message }
            }
            OpenAiError::Timeout => RetrievalError::Timeout,
            OpenAiError::Connection(message) => RetrievalError::ConnectionError(message),
            other => RetrievalError::EmbeddingFailed(other.to_string()),
        }
    }
}
