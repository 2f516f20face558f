//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: chat models that can review documents
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
