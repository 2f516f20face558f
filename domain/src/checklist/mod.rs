//! Regulatory checklists and upload classification.
//!
//! - [`document_type::DocumentType`]: document types inferred from filenames
//! - [`process::ProcessKind`] / [`process::Checklist`]: processes and their required documents
//! - [`classifier::classify`]: upload set -> [`classifier::ComplianceSummary`]

pub mod classifier;
pub mod document_type;
pub mod process;
