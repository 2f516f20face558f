//! Progress notification port
//!
//! Defines the interface for reporting progress while documents are reviewed.

use corporate_agent_domain::DocumentFailure;

/// Callback for progress updates during a review
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain log lines, etc.)
pub trait ReviewProgressNotifier: Send + Sync {
    /// Called when a document's units are ready and its batches are known
    fn on_document_start(&self, document: &str, total_batches: usize);

    /// Called after each batch has been reviewed
    fn on_batch_complete(&self, document: &str, batch: usize, issues_found: usize);

    /// Called when a document has been reviewed and written out
    fn on_document_complete(&self, document: &str, issues_found: usize);

    /// Called when a document is abandoned
    fn on_document_failed(&self, _failure: &DocumentFailure) {}

    /// Called before a failed call is retried
    fn on_retry(&self, _document: &str, _attempt: u32, _error: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ReviewProgressNotifier for NoProgress {
    fn on_document_start(&self, _document: &str, _total_batches: usize) {}
    fn on_batch_complete(&self, _document: &str, _batch: usize, _issues_found: usize) {}
    fn on_document_complete(&self, _document: &str, _issues_found: usize) {}
}
