//! Final report assembly

use super::entities::{DocumentOutcome, DocumentReport, FinalReport};
use crate::checklist::classifier::ComplianceSummary;

/// Merge the checklist summary with every document's outcome.
///
/// Issues keep document order, then batch order. Nothing is filtered or
/// deduplicated: identical findings in different documents are all kept.
pub fn assemble(summary: ComplianceSummary, outcomes: Vec<DocumentOutcome>) -> FinalReport {
    let mut report = FinalReport {
        summary,
        ..FinalReport::default()
    };

    for outcome in outcomes {
        match outcome {
            DocumentOutcome::Reviewed(review) => {
                report.review_stats.merge(&review.stats);
                let document = review.document;
                report
                    .issues_found
                    .extend(review.findings.into_iter().map(|finding| DocumentReport {
                        document: document.clone(),
                        section: finding.section,
                        issue: finding.issue.issue,
                        severity: finding.issue.severity,
                        suggestion: finding.issue.suggestion,
                    }));
            }
            DocumentOutcome::Failed(failure) => report.document_errors.push(failure),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::classifier::classify;
    use crate::checklist::process::ProcessKind;
    use crate::report::entities::{
        DocumentFailure, DocumentReview, FailureStage, Finding, ReviewStats,
    };
    use crate::review::issue::{Issue, Severity};

    fn finding(clause: usize, text: &str) -> Finding {
        Finding {
            issue: Issue {
                clause_number: clause,
                issue: text.to_string(),
                severity: Severity::High,
                suggestion: "fix it".to_string(),
            },
            section: format!("Paragraph starting with: 'clause {}...'", clause),
        }
    }

    fn review(name: &str, findings: Vec<Finding>, batches: usize) -> DocumentOutcome {
        DocumentOutcome::Reviewed(DocumentReview {
            document: name.to_string(),
            findings,
            stats: ReviewStats {
                batches_reviewed: batches,
                ..ReviewStats::default()
            },
        })
    }

    #[test]
    fn test_assemble_preserves_document_order() {
        let summary = classify(&["Articles_of_Association.docx", "Board_Resolution.docx"]);
        let report = assemble(
            summary,
            vec![
                review(
                    "Articles_of_Association.docx",
                    vec![finding(1, "jurisdiction"), finding(3, "missing signatory")],
                    2,
                ),
                review("Board_Resolution.docx", vec![finding(2, "date")], 1),
            ],
        );

        assert_eq!(report.summary.process, ProcessKind::CompanyIncorporation);
        let docs: Vec<_> = report.issues_found.iter().map(|r| r.document.as_str()).collect();
        assert_eq!(
            docs,
            vec![
                "Articles_of_Association.docx",
                "Articles_of_Association.docx",
                "Board_Resolution.docx"
            ]
        );
        assert_eq!(report.issues_found[1].issue, "missing signatory");
        assert_eq!(report.review_stats.batches_reviewed, 3);
        assert!(!report.has_errors());
    }

    #[test]
    fn test_assemble_keeps_duplicates() {
        let report = assemble(
            ComplianceSummary::unknown(),
            vec![
                review("a.docx", vec![finding(1, "same")], 1),
                review("b.docx", vec![finding(1, "same")], 1),
            ],
        );
        assert_eq!(report.issue_count(), 2);
        assert_eq!(report.issues_found[0].issue, report.issues_found[1].issue);
    }

    #[test]
    fn test_assemble_records_failures() {
        let report = assemble(
            ComplianceSummary::unknown(),
            vec![
                DocumentOutcome::Failed(DocumentFailure::new(
                    "broken.docx",
                    FailureStage::Parse,
                    "not a zip archive",
                )),
                review("ok.docx", vec![finding(1, "x")], 1),
            ],
        );
        assert_eq!(report.issue_count(), 1);
        assert_eq!(report.document_errors.len(), 1);
        assert_eq!(report.document_errors[0].stage, FailureStage::Parse);
    }

    #[test]
    fn test_serialized_shape() {
        let summary = classify(&["Articles_of_Association.docx"]);
        let report = assemble(summary, vec![review("Articles_of_Association.docx", vec![finding(1, "x")], 1)]);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["process"], "Company Incorporation");
        assert_eq!(json["documents_uploaded"], 1);
        assert_eq!(json["required_documents"], 5);
        assert_eq!(json["issues_found"][0]["document"], "Articles_of_Association.docx");
        assert_eq!(json["issues_found"][0]["severity"], "High");
        assert!(json.get("document_errors").is_none());
        assert_eq!(json["review_stats"]["batches_reviewed"], 1);
    }
}
