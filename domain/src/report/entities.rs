//! Report entities

use crate::checklist::classifier::ComplianceSummary;
use crate::review::issue::{Issue, Severity};
use serde::{Deserialize, Serialize};

/// An issue as it appears in the final report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub document: String,
    /// Excerpt locating the flagged paragraph
    pub section: String,
    pub issue: String,
    pub severity: Severity,
    pub suggestion: String,
}

/// An issue paired with the excerpt of the unit it refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub issue: Issue,
    pub section: String,
}

/// Counters of the lossy recovery paths taken while reviewing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub batches_reviewed: usize,
    /// Batches whose response was not a JSON array (contributed no issues)
    pub malformed_responses: usize,
    /// Response elements dropped for a missing or out-of-range clause number
    pub discarded_issues: usize,
}

impl ReviewStats {
    pub fn merge(&mut self, other: &ReviewStats) {
        self.batches_reviewed += other.batches_reviewed;
        self.malformed_responses += other.malformed_responses;
        self.discarded_issues += other.discarded_issues;
    }
}

/// Everything one successful document review produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReview {
    pub document: String,
    /// Findings in batch order, then response order
    pub findings: Vec<Finding>,
    pub stats: ReviewStats,
}

impl DocumentReview {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            findings: Vec::new(),
            stats: ReviewStats::default(),
        }
    }

    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.findings.iter().map(|f| &f.issue)
    }
}

/// Where processing of a document stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStage {
    Fetch,
    Parse,
    Review,
    Persist,
}

impl FailureStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureStage::Fetch => "fetch",
            FailureStage::Parse => "parse",
            FailureStage::Review => "review",
            FailureStage::Persist => "persist",
        }
    }
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A document that could not be fully processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub document: String,
    pub stage: FailureStage,
    pub message: String,
}

impl DocumentFailure {
    pub fn new(document: impl Into<String>, stage: FailureStage, message: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            stage,
            message: message.into(),
        }
    }
}

/// Per-document result handed to the report assembler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    Reviewed(DocumentReview),
    Failed(DocumentFailure),
}

/// The report returned for one analysis request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FinalReport {
    #[serde(flatten)]
    pub summary: ComplianceSummary,
    pub issues_found: Vec<DocumentReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub document_errors: Vec<DocumentFailure>,
    #[serde(default)]
    pub review_stats: ReviewStats,
}

impl FinalReport {
    pub fn issue_count(&self) -> usize {
        self.issues_found.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.document_errors.is_empty()
    }
}
