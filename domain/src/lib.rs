//! Domain layer for corporate-agent
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Checklist classification
//!
//! Uploaded filenames are mapped to document types, which select a regulatory
//! process (incorporation, licensing, annual filing) and its checklist of
//! mandatory documents.
//!
//! ## Review units
//!
//! A document is reviewed as a sequence of [`DocumentUnit`]s (paragraphs long
//! enough to carry legal content), submitted to the model in small batches.
//! The model answers with a JSON array of [`Issue`]s keyed by clause number.
//!
//! ## Report
//!
//! The checklist summary and every document's findings merge into one
//! [`FinalReport`].

pub mod checklist;
pub mod config;
pub mod core;
pub mod document;
pub mod prompt;
pub mod report;
pub mod review;
pub mod util;

// Re-export commonly used types
pub use checklist::{
    classifier::{ComplianceSummary, classify},
    document_type::DocumentType,
    process::{Checklist, ProcessKind},
};
pub use config::OutputFormat;
pub use core::{
    error::{DomainError, validate_document_name},
    model::Model,
};
pub use document::{
    batch::{Batch, DEFAULT_BATCH_SIZE, batches},
    unit::{DEFAULT_MIN_PARAGRAPH_CHARS, DocumentUnit, segment},
};
pub use prompt::{PromptTemplate, format_clauses};
pub use report::{
    assembler::assemble,
    entities::{
        DocumentFailure, DocumentOutcome, DocumentReport, DocumentReview, FailureStage,
        FinalReport, Finding, ReviewStats,
    },
};
pub use review::{
    decoding::{DecodedIssues, DiscardReason, DiscardedIssue, ResponseDecodeError, decode_issues},
    issue::{Issue, Severity},
};
