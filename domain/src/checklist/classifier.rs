//! Checklist classification of an upload set
//!
//! Pure domain logic: maps uploaded filenames to a regulatory process and
//! reports which mandatory documents are missing. No I/O, never fails.

use super::document_type::DocumentType;
use super::process::ProcessKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Result of checklist classification
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub process: ProcessKind,
    /// Number of uploaded files (omitted for `Unknown`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents_uploaded: Option<usize>,
    /// Number of documents the checklist requires (omitted for `Unknown`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_documents: Option<usize>,
    /// Required document types not found among the uploads
    #[serde(default)]
    pub missing_documents: BTreeSet<DocumentType>,
}

impl ComplianceSummary {
    /// Summary for an upload set that matches no checklist
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// Classify a set of uploaded filenames against the regulatory checklists.
///
/// Incorporation documents take precedence over licensing documents, which
/// take precedence over annual filing documents.
pub fn classify<S: AsRef<str>>(filenames: &[S]) -> ComplianceSummary {
    let uploaded: BTreeSet<DocumentType> = filenames
        .iter()
        .map(|name| DocumentType::from_filename(name.as_ref()))
        .collect();

    let process = infer_process(&uploaded);

    let Some(checklist) = process.checklist() else {
        return ComplianceSummary::unknown();
    };

    let missing_documents = checklist
        .documents
        .iter()
        .copied()
        .filter(|doc_type| !uploaded.contains(doc_type))
        .collect();

    ComplianceSummary {
        process,
        documents_uploaded: Some(filenames.len()),
        required_documents: Some(checklist.required_count),
        missing_documents,
    }
}

fn infer_process(uploaded: &BTreeSet<DocumentType>) -> ProcessKind {
    let incorporation_markers = [
        DocumentType::ArticlesOfAssociation,
        DocumentType::BoardResolutionForIncorporation,
    ];
    if incorporation_markers.iter().any(|t| uploaded.contains(t)) {
        return ProcessKind::CompanyIncorporation;
    }

    for process in [ProcessKind::FinancialServicesLicensing, ProcessKind::AnnualFiling] {
        if let Some(checklist) = process.checklist()
            && uploaded.iter().any(|t| checklist.contains(*t))
        {
            return process;
        }
    }

    ProcessKind::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(types: &[DocumentType]) -> BTreeSet<DocumentType> {
        types.iter().copied().collect()
    }

    #[test]
    fn test_incorporation_with_two_documents() {
        let summary = classify(&["Articles_of_Association.docx", "Board_Resolution.docx"]);

        assert_eq!(summary.process, ProcessKind::CompanyIncorporation);
        assert_eq!(summary.documents_uploaded, Some(2));
        assert_eq!(summary.required_documents, Some(5));
        assert_eq!(
            summary.missing_documents,
            set(&[
                DocumentType::MemorandumOfAssociation,
                DocumentType::UboDeclarationForm,
                DocumentType::RegisterOfMembersAndDirectors,
            ])
        );
    }

    #[test]
    fn test_articles_alone_is_incorporation() {
        let summary = classify(&["aoa.docx"]);
        assert_eq!(summary.process, ProcessKind::CompanyIncorporation);
        assert!(
            !summary
                .missing_documents
                .contains(&DocumentType::ArticlesOfAssociation)
        );
        assert_eq!(summary.missing_documents.len(), 4);
    }

    #[test]
    fn test_incorporation_wins_over_licensing() {
        let summary = classify(&["business plan.docx", "Articles.docx"]);
        assert_eq!(summary.process, ProcessKind::CompanyIncorporation);
        // Business plan is not part of the incorporation checklist
        assert!(!summary.missing_documents.contains(&DocumentType::BusinessPlan));
    }

    #[test]
    fn test_licensing_process() {
        let summary = classify(&["AML_policy_v2.docx", "business plan.docx", "notes.docx"]);
        assert_eq!(summary.process, ProcessKind::FinancialServicesLicensing);
        assert_eq!(summary.documents_uploaded, Some(3));
        assert_eq!(summary.required_documents, Some(6));
        assert_eq!(
            summary.missing_documents,
            set(&[
                DocumentType::ApplicationForFsp,
                DocumentType::FinancialProjections,
                DocumentType::ComplianceManual,
                DocumentType::ControllersAndAuthorisedIndividualsForms,
            ])
        );
    }

    #[test]
    fn test_annual_filing_process() {
        let summary = classify(&["Annual Return 2024.docx"]);
        assert_eq!(summary.process, ProcessKind::AnnualFiling);
        assert_eq!(
            summary.missing_documents,
            set(&[DocumentType::AnnualAccounts])
        );
    }

    #[test]
    fn test_complete_set_has_nothing_missing() {
        let summary = classify(&["annual return.docx", "annual accounts.docx"]);
        assert_eq!(summary.process, ProcessKind::AnnualFiling);
        assert!(summary.missing_documents.is_empty());
    }

    #[test]
    fn test_unknown_uploads() {
        let summary = classify(&["holiday.docx", "letter.docx"]);
        assert_eq!(summary, ComplianceSummary::unknown());
        assert_eq!(summary.process, ProcessKind::Unknown);
        assert!(summary.missing_documents.is_empty());
        assert!(summary.documents_uploaded.is_none());
    }

    #[test]
    fn test_empty_input_is_unknown() {
        let names: [&str; 0] = [];
        assert_eq!(classify(&names).process, ProcessKind::Unknown);
    }

    #[test]
    fn test_missing_is_subset_of_checklist() {
        let inputs: [&[&str]; 4] = [
            &["articles.docx"],
            &["fsp application.docx", "controller forms.docx"],
            &["annual accounts.docx"],
            &["board minutes.docx", "register.docx"],
        ];
        for names in inputs {
            let summary = classify(names);
            let checklist = summary.process.checklist().unwrap();
            assert!(summary.missing_documents.iter().all(|t| checklist.contains(*t)));
        }
    }

    #[test]
    fn test_unknown_omits_counts_when_serialized() {
        let json = serde_json::to_value(classify(&["letter.docx"])).unwrap();
        assert_eq!(json["process"], "Unknown");
        assert!(json.get("documents_uploaded").is_none());
        assert_eq!(json["missing_documents"], serde_json::json!([]));
    }
}
