//! Regulatory processes and their document checklists

use super::document_type::DocumentType;
use serde::{Deserialize, Serialize};

/// Regulatory process a set of uploads belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProcessKind {
    #[serde(rename = "Company Incorporation")]
    CompanyIncorporation,
    #[serde(rename = "Financial Services Licensing")]
    FinancialServicesLicensing,
    #[serde(rename = "Annual Filing")]
    AnnualFiling,
    #[default]
    Unknown,
}

impl ProcessKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessKind::CompanyIncorporation => "Company Incorporation",
            ProcessKind::FinancialServicesLicensing => "Financial Services Licensing",
            ProcessKind::AnnualFiling => "Annual Filing",
            ProcessKind::Unknown => "Unknown",
        }
    }

    /// The checklist for this process, or `None` for `Unknown`
    pub fn checklist(&self) -> Option<Checklist> {
        match self {
            ProcessKind::CompanyIncorporation => Some(Checklist {
                process: *self,
                required_count: 5,
                documents: &[
                    DocumentType::ArticlesOfAssociation,
                    DocumentType::MemorandumOfAssociation,
                    DocumentType::BoardResolutionForIncorporation,
                    DocumentType::UboDeclarationForm,
                    DocumentType::RegisterOfMembersAndDirectors,
                ],
            }),
            ProcessKind::FinancialServicesLicensing => Some(Checklist {
                process: *self,
                required_count: 6,
                documents: &[
                    DocumentType::ApplicationForFsp,
                    DocumentType::BusinessPlan,
                    DocumentType::FinancialProjections,
                    DocumentType::ComplianceManual,
                    DocumentType::AmlPolicy,
                    DocumentType::ControllersAndAuthorisedIndividualsForms,
                ],
            }),
            ProcessKind::AnnualFiling => Some(Checklist {
                process: *self,
                required_count: 2,
                documents: &[DocumentType::AnnualReturn, DocumentType::AnnualAccounts],
            }),
            ProcessKind::Unknown => None,
        }
    }

    /// Whether this process has a checklist
    pub fn is_recognized(&self) -> bool {
        !matches!(self, ProcessKind::Unknown)
    }
}

impl std::fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A regulatory checklist: the documents a process requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checklist {
    pub process: ProcessKind,
    /// Number of mandatory documents as published in the checklist
    pub required_count: usize,
    pub documents: &'static [DocumentType],
}

impl Checklist {
    pub fn contains(&self, doc_type: DocumentType) -> bool {
        self.documents.contains(&doc_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checklist_counts_match_documents() {
        for process in [
            ProcessKind::CompanyIncorporation,
            ProcessKind::FinancialServicesLicensing,
            ProcessKind::AnnualFiling,
        ] {
            let checklist = process.checklist().unwrap();
            assert_eq!(checklist.required_count, checklist.documents.len());
            assert_eq!(checklist.process, process);
        }
    }

    #[test]
    fn test_unknown_has_no_checklist() {
        assert!(ProcessKind::Unknown.checklist().is_none());
        assert!(!ProcessKind::Unknown.is_recognized());
    }

    #[test]
    fn test_serialize_display_name() {
        let json = serde_json::to_string(&ProcessKind::FinancialServicesLicensing).unwrap();
        assert_eq!(json, "\"Financial Services Licensing\"");
        let parsed: ProcessKind = serde_json::from_str("\"Annual Filing\"").unwrap();
        assert_eq!(parsed, ProcessKind::AnnualFiling);
    }
}
