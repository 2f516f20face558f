//! Console output formatter for analysis reports

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use corporate_agent_application::AnalysisOutput;
use corporate_agent_domain::{DocumentReport, FinalReport, Severity};

/// Formats analysis results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn format_summary(output: &AnalysisOutput) -> String {
        let report = &output.report;
        let mut out = String::new();

        out.push_str(&Self::header("ADGM Compliance Report"));
        out.push('\n');

        out.push_str(&Self::checklist(report));

        // Issues, grouped by document in report order
        out.push_str(&Self::section_header(&format!(
            "Issues Found ({})",
            report.issue_count()
        )));
        if report.issues_found.is_empty() {
            out.push_str(&format!("\n{}\n", "No issues found.".green()));
        }
        let mut current: Option<&str> = None;
        for issue in &report.issues_found {
            if current != Some(issue.document.as_str()) {
                out.push_str(&format!(
                    "\n{}\n",
                    format!("── {} ──", issue.document).yellow().bold()
                ));
                current = Some(issue.document.as_str());
            }
            out.push_str(&Self::issue(issue));
        }

        if report.has_errors() {
            out.push_str(&Self::section_header("Document Errors"));
            for failure in &report.document_errors {
                out.push_str(&format!(
                    "  {} {} ({}): {}\n",
                    "x".red(),
                    failure.document,
                    failure.stage,
                    failure.message
                ));
            }
        }

        if !output.reviewed_documents.is_empty() {
            out.push_str(&Self::section_header("Reviewed Copies"));
            for path in &output.reviewed_documents {
                out.push_str(&format!("  {}\n", path.display()));
            }
        }

        let stats = &report.review_stats;
        out.push_str(&format!(
            "\n{} {} batch(es), {} malformed response(s), {} discarded issue(s)\n",
            "Review:".dimmed(),
            stats.batches_reviewed,
            stats.malformed_responses,
            stats.discarded_issues
        ));

        out.push_str(&Self::footer());
        out
    }

    pub fn format_json(output: &AnalysisOutput) -> String {
        serde_json::to_string_pretty(&output.report).unwrap_or_else(|_| "{}".to_string())
    }

    fn checklist(report: &FinalReport) -> String {
        let summary = &report.summary;
        let mut out = format!("{} {}\n", "Process:".cyan().bold(), summary.process);

        if !summary.process.is_recognized() {
            out.push_str(&format!(
                "{}\n",
                "No checklist matches the uploaded filenames.".dimmed()
            ));
            return out;
        }

        if let (Some(uploaded), Some(required)) =
            (summary.documents_uploaded, summary.required_documents)
        {
            out.push_str(&format!(
                "{} {} uploaded, {} required\n",
                "Documents:".cyan().bold(),
                uploaded,
                required
            ));
        }

        if summary.missing_documents.is_empty() {
            out.push_str(&format!("{}\n", "All required documents present.".green()));
        } else {
            out.push_str(&format!("{}\n", "Missing documents:".red().bold()));
            for doc in &summary.missing_documents {
                out.push_str(&format!("  * {}\n", doc));
            }
        }
        out
    }

    fn issue(issue: &DocumentReport) -> String {
        let severity = match issue.severity {
            Severity::High => issue.severity.as_str().red().bold(),
            Severity::Medium => issue.severity.as_str().yellow(),
            Severity::Low => issue.severity.as_str().normal(),
        };
        format!(
            "  [{}] {}\n{}\n{}\n",
            severity,
            issue.section.dimmed(),
            Self::indent(&format!("Issue: {}", issue.issue), "      "),
            Self::indent(&format!("Suggestion: {}", issue.suggestion), "      "),
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_summary(&self, output: &AnalysisOutput) -> String {
        Self::format_summary(output)
    }

    fn format_json(&self, output: &AnalysisOutput) -> String {
        Self::format_json(output)
    }
}
