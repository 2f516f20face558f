//! Prompt domain
//!
//! Templates for the compliance review prompt sent with each batch.

mod template;

pub use template::{PromptTemplate, format_clauses};
