//! Use cases (application services)

pub mod analyze_documents;
pub mod review_document;
pub(crate) mod shared;
