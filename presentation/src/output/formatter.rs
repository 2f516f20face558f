//! Output formatter trait

use corporate_agent_application::AnalysisOutput;
use corporate_agent_domain::OutputFormat;

/// Trait for formatting analysis results
pub trait OutputFormatter {
    /// Checklist summary, issues grouped by document, failures and copies
    fn format_summary(&self, output: &AnalysisOutput) -> String;

    /// The final report as pretty-printed JSON
    fn format_json(&self, output: &AnalysisOutput) -> String;

    fn format(&self, output: &AnalysisOutput, format: OutputFormat) -> String {
        match format {
            OutputFormat::Summary => self.format_summary(output),
            OutputFormat::Json => self.format_json(output),
        }
    }
}
