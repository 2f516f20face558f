//! Analyze Documents use case
//!
//! End-to-end flow for one upload set: classify the filenames against the
//! checklists, then fetch, open, review and persist each document in upload
//! order, and assemble the final report.

use crate::ports::document::DocumentCodec;
use crate::ports::document_source::DocumentSource;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ReviewProgressNotifier};
use crate::ports::retriever::Retriever;
use crate::use_cases::review_document::{ReviewDocumentError, ReviewDocumentUseCase};
use crate::use_cases::shared::is_cancelled;
use corporate_agent_domain::{
    DocumentFailure, DocumentOutcome, DomainError, FailureStage, FinalReport, assemble, classify,
    validate_document_name,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Prefix given to every annotated copy
pub const REVIEWED_PREFIX: &str = "REVIEWED_";

/// Errors that stop the whole analysis
#[derive(Error, Debug)]
pub enum AnalyzeDocumentsError {
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A document to analyze: the name it was uploaded under and where to read it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// Declared filename, used for classification and the output name
    pub name: String,
    /// Local path or http(s) URL
    pub location: String,
}

impl DocumentRef {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }

    /// Reference a local file, naming it after its final path component
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self::new(name, path.to_string_lossy())
    }
}

/// Input for the AnalyzeDocuments use case
#[derive(Debug, Clone)]
pub struct AnalyzeDocumentsInput {
    /// Documents in upload order
    pub documents: Vec<DocumentRef>,
    /// Directory receiving the annotated copies
    pub output_dir: PathBuf,
}

impl AnalyzeDocumentsInput {
    pub fn new(documents: Vec<DocumentRef>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            documents,
            output_dir: output_dir.into(),
        }
    }
}

/// Result of an analysis
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub report: FinalReport,
    /// Paths of the annotated copies that were written, in upload order
    pub reviewed_documents: Vec<PathBuf>,
}

/// Path of the annotated copy of `name`
pub fn reviewed_path(output_dir: &Path, name: &str) -> PathBuf {
    output_dir.join(format!("{}{}", REVIEWED_PREFIX, name))
}

/// Use case for analyzing a set of uploaded documents
pub struct AnalyzeDocumentsUseCase<G: LlmGateway + 'static, R: Retriever + 'static> {
    reviewer: ReviewDocumentUseCase<G, R>,
    source: Arc<dyn DocumentSource>,
    codec: Arc<dyn DocumentCodec>,
    cancellation_token: Option<CancellationToken>,
}

impl<G: LlmGateway + 'static, R: Retriever + 'static> AnalyzeDocumentsUseCase<G, R> {
    pub fn new(
        reviewer: ReviewDocumentUseCase<G, R>,
        source: Arc<dyn DocumentSource>,
        codec: Arc<dyn DocumentCodec>,
    ) -> Self {
        Self {
            reviewer,
            source,
            codec,
            cancellation_token: None,
        }
    }

    /// Set a cancellation token, checked between documents and between batches
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.reviewer = self.reviewer.with_cancellation(token.clone());
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: AnalyzeDocumentsInput,
    ) -> Result<AnalysisOutput, AnalyzeDocumentsError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: AnalyzeDocumentsInput,
        progress: &dyn ReviewProgressNotifier,
    ) -> Result<AnalysisOutput, AnalyzeDocumentsError> {
        if input.documents.is_empty() {
            return Err(DomainError::NoDocuments.into());
        }

        let names: Vec<&str> = input.documents.iter().map(|d| d.name.as_str()).collect();
        let summary = classify(&names);
        info!(
            process = %summary.process,
            documents = names.len(),
            missing = summary.missing_documents.len(),
            "Classified upload set"
        );

        let mut outcomes = Vec::with_capacity(input.documents.len());
        let mut reviewed_documents = Vec::new();

        for document in &input.documents {
            if is_cancelled(&self.cancellation_token) {
                return Err(DomainError::Cancelled.into());
            }

            match self
                .process_document(document, &input.output_dir, progress)
                .await
            {
                Ok((review, path)) => {
                    reviewed_documents.push(path);
                    outcomes.push(DocumentOutcome::Reviewed(review));
                }
                Err(DocumentStop::Cancelled) => return Err(DomainError::Cancelled.into()),
                Err(DocumentStop::Failed(failure)) => {
                    warn!(
                        document = %failure.document,
                        stage = %failure.stage,
                        "Document failed: {}",
                        failure.message
                    );
                    progress.on_document_failed(&failure);
                    outcomes.push(DocumentOutcome::Failed(failure));
                }
            }
        }

        let report = assemble(summary, outcomes);
        info!(
            issues = report.issue_count(),
            failed = report.document_errors.len(),
            "Analysis complete"
        );

        Ok(AnalysisOutput {
            report,
            reviewed_documents,
        })
    }

    async fn process_document(
        &self,
        document: &DocumentRef,
        output_dir: &Path,
        progress: &dyn ReviewProgressNotifier,
    ) -> Result<(corporate_agent_domain::DocumentReview, PathBuf), DocumentStop> {
        let name = document.name.as_str();
        let fail = |stage: FailureStage, message: String| {
            DocumentStop::Failed(DocumentFailure::new(name, stage, message))
        };

        // The name becomes part of the output path; reject it before doing any work
        validate_document_name(name).map_err(|e| fail(FailureStage::Persist, e.to_string()))?;

        let bytes = self
            .source
            .fetch(&document.location)
            .await
            .map_err(|e| fail(FailureStage::Fetch, e.to_string()))?;

        let mut opened = self
            .codec
            .open(name, bytes)
            .map_err(|e| fail(FailureStage::Parse, e.to_string()))?;

        let review = match self
            .reviewer
            .execute_with_progress(name, opened.as_mut(), progress)
            .await
        {
            Ok(review) => review,
            Err(ReviewDocumentError::Cancelled) => return Err(DocumentStop::Cancelled),
            Err(e) => return Err(fail(FailureStage::Review, e.to_string())),
        };

        let path = reviewed_path(output_dir, name);
        opened
            .persist(&path)
            .map_err(|e| fail(FailureStage::Persist, e.to_string()))?;
        info!(
            document = name,
            path = %path.display(),
            comments = opened.annotation_count(),
            "Saved reviewed document"
        );

        Ok((review, path))
    }
}

/// Why processing of one document stopped early
enum DocumentStop {
    Failed(DocumentFailure),
    Cancelled,
}
