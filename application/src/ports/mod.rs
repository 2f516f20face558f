//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod conversation_logger;
pub mod document;
pub mod document_source;
pub mod llm_gateway;
pub mod progress;
pub mod rate_limiter;
pub mod retriever;
