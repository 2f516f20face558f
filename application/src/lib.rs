//! Application layer for corporate-agent
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_ANNOTATION_AUTHOR, RetryPolicy, ReviewParams};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    document::{DocumentCodec, DocumentError, ReviewDocument},
    document_source::{DocumentSource, FetchError},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{NoProgress, ReviewProgressNotifier},
    rate_limiter::{RateLimiter, Unlimited},
    retriever::{RetrievalError, Retriever},
};
pub use use_cases::analyze_documents::{
    AnalysisOutput, AnalyzeDocumentsError, AnalyzeDocumentsInput, AnalyzeDocumentsUseCase,
    DocumentRef, REVIEWED_PREFIX, reviewed_path,
};
pub use use_cases::review_document::{ReviewDocumentError, ReviewDocumentUseCase};
