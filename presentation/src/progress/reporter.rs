//! Progress reporting while documents are reviewed

use colored::Colorize;
use corporate_agent_application::ports::progress::ReviewProgressNotifier;
use corporate_agent_domain::DocumentFailure;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;

/// One progress bar per document, advanced batch by batch
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<String, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn document_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} batches {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn take_bar(&self, document: &str) -> Option<ProgressBar> {
        self.bars.lock().ok()?.remove(document)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewProgressNotifier for ProgressReporter {
    fn on_document_start(&self, document: &str, total_batches: usize) {
        let pb = self.multi.add(ProgressBar::new(total_batches as u64));
        pb.set_style(Self::document_style());
        pb.set_prefix(document.to_string());
        pb.set_message("reviewing...");

        if let Ok(mut bars) = self.bars.lock() {
            bars.insert(document.to_string(), pb);
        }
    }

    fn on_batch_complete(&self, document: &str, _batch: usize, issues_found: usize) {
        if let Ok(bars) = self.bars.lock()
            && let Some(pb) = bars.get(document)
        {
            pb.set_message(format!("{} issue(s)", issues_found));
            pb.inc(1);
        }
    }

    fn on_document_complete(&self, document: &str, issues_found: usize) {
        if let Some(pb) = self.take_bar(document) {
            let status = if issues_found == 0 {
                "no issues".green().to_string()
            } else {
                format!("{} issue(s)", issues_found).yellow().to_string()
            };
            pb.finish_with_message(format!("{} {}", "v".green(), status));
        }
    }

    fn on_document_failed(&self, failure: &DocumentFailure) {
        let message = format!("{} {} failed: {}", "x".red(), failure.stage, failure.message);
        match self.take_bar(&failure.document) {
            Some(pb) => pb.abandon_with_message(message),
            None => {
                let _ = self
                    .multi
                    .println(format!("{} {}", failure.document.bold(), message));
            }
        }
    }

    fn on_retry(&self, document: &str, attempt: u32, error: &str) {
        let _ = self.multi.println(format!(
            "  {} {} retry {}: {}",
            "!".yellow(),
            document,
            attempt,
            error
        ));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ReviewProgressNotifier for SimpleProgress {
    fn on_document_start(&self, document: &str, total_batches: usize) {
        println!(
            "{} {} ({} batches)",
            "->".cyan(),
            document.bold(),
            total_batches
        );
    }

    fn on_batch_complete(&self, _document: &str, batch: usize, issues_found: usize) {
        println!("  {} batch {} ({} issues)", "v".green(), batch + 1, issues_found);
    }

    fn on_document_complete(&self, _document: &str, issues_found: usize) {
        println!("  {} {} issue(s)\n", "=".cyan(), issues_found);
    }

    fn on_document_failed(&self, failure: &DocumentFailure) {
        println!(
            "  {} {} failed at {}: {}\n",
            "x".red(),
            failure.document,
            failure.stage,
            failure.message
        );
    }

    fn on_retry(&self, document: &str, attempt: u32, error: &str) {
        println!("  {} {} retry {}: {}", "!".yellow(), document, attempt, error);
    }
}
