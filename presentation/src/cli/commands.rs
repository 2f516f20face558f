//! CLI command definitions

use clap::{Parser, ValueEnum};
use corporate_agent_application::DocumentRef;
use corporate_agent_domain::OutputFormat;
use std::path::{Path, PathBuf};

/// Report format on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Checklist summary followed by the issue list
    Summary,
    /// The full report as JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Summary => OutputFormat::Summary,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for corporate-agent
#[derive(Parser, Debug)]
#[command(name = "corporate-agent")]
#[command(author, version, about = "ADGM compliance review for corporate documents")]
#[command(long_about = r#"
Corporate Agent checks a set of .docx uploads against the ADGM checklists and
reviews every paragraph against the ADGM regulations.

For each run it:
1. Classifies the filenames into a process (incorporation, licensing, annual
   filing) and lists the mandatory documents that are missing
2. Reviews each document in small batches, with regulation passages
   retrieved from a local vector index
3. Writes REVIEWED_<name> copies with comments on the flagged paragraphs

Configuration files are loaded from (in priority order):
1. CORPORATE_AGENT_* environment variables
2. --config <path>     Explicit config file
3. ./corporate-agent.toml    Project-level config
4. ~/.config/corporate-agent/config.toml   Global config

Example:
  corporate-agent Articles_of_Association.docx Board_Resolution.docx
  corporate-agent --format json -o out https://example.com/AoA.docx
  corporate-agent --build-index
"#)]
pub struct Cli {
    /// Documents to review: local paths or http(s) URLs
    #[arg(value_name = "DOCUMENTS")]
    pub documents: Vec<String>,

    /// Directory for the REVIEWED_ copies (default: output.dir from config)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report format (default: output.format from config, else summary)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Rebuild the regulation index, even if one exists
    #[arg(long)]
    pub build_index: bool,

    /// Write daily log files to this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Documents in the order given, named after their last path segment
    pub fn document_refs(&self) -> Vec<DocumentRef> {
        self.documents.iter().map(|arg| document_ref(arg)).collect()
    }
}

fn document_ref(arg: &str) -> DocumentRef {
    if arg.starts_with("http://") || arg.starts_with("https://") {
        let path = arg.split(['?', '#']).next().unwrap_or(arg);
        let name = path
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or(path);
        return DocumentRef::new(name, arg);
    }
    DocumentRef::from_path(Path::new(arg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_documents_and_flags() {
        let cli = Cli::parse_from([
            "corporate-agent",
            "AoA.docx",
            "https://example.com/Board_Resolution.docx",
            "-o",
            "out",
            "--format",
            "json",
            "-vv",
        ]);
        assert_eq!(cli.documents.len(), 2);
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.format.map(OutputFormat::from), Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.build_index);
    }

    #[test]
    fn test_document_refs() {
        let cli = Cli::parse_from([
            "corporate-agent",
            "uploads/Articles_of_Association.docx",
            "https://example.com/files/Board_Resolution.docx?download=1",
        ]);
        let refs = cli.document_refs();
        assert_eq!(
            refs[0],
            DocumentRef::new(
                "Articles_of_Association.docx",
                "uploads/Articles_of_Association.docx"
            )
        );
        assert_eq!(refs[1].name, "Board_Resolution.docx");
        assert_eq!(
            refs[1].location,
            "https://example.com/files/Board_Resolution.docx?download=1"
        );
    }

    #[test]
    fn test_build_index_without_documents() {
        let cli = Cli::parse_from(["corporate-agent", "--build-index", "--no-config"]);
        assert!(cli.documents.is_empty());
        assert!(cli.build_index);
        assert!(cli.no_config);
        assert!(cli.format.is_none());
    }
}
