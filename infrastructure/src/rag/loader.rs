//! Loading downloaded regulation files as plain text

use super::error::IndexError;
use crate::docx::extract_paragraphs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Text of one regulation file
#[derive(Debug, Clone, PartialEq)]
pub struct SourceText {
    /// Path relative to the sources directory
    pub source: String,
    pub text: String,
}

/// File kinds the index understands, keyed by glob pattern
const PATTERNS: [(&str, SourceKind); 4] = [
    ("**/*.docx", SourceKind::Docx),
    ("**/*.pdf", SourceKind::Pdf),
    ("**/*.html", SourceKind::Text),
    ("**/*.txt", SourceKind::Text),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Docx,
    Pdf,
    /// HTML pages are stored as extracted text when downloaded
    Text,
}

/// Load every supported file under `dir`
///
/// A file that cannot be read or parsed is logged and skipped. Blocking;
/// run it off the async executor.
pub fn load_directory(dir: &Path) -> Result<Vec<SourceText>, IndexError> {
    let base = glob::Pattern::escape(&dir.to_string_lossy());
    let mut loaded = Vec::new();

    for (pattern, kind) in PATTERNS {
        let full = format!("{}/{}", base.trim_end_matches('/'), pattern);
        let paths = match glob::glob(&full) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Invalid source pattern {}: {}", full, e);
                continue;
            }
        };

        let mut count = 0;
        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Cannot read source entry: {}", e);
                    continue;
                }
            };
            match load_file(&path, kind) {
                Ok(text) if text.trim().is_empty() => {
                    debug!("Skipping empty source {}", path.display());
                }
                Ok(text) => {
                    loaded.push(SourceText {
                        source: relative_name(dir, &path),
                        text,
                    });
                    count += 1;
                }
                Err(e) => warn!("Could not load {}: {}", path.display(), e),
            }
        }
        info!("Loaded {} document(s) for pattern {}", count, pattern);
    }

    if loaded.is_empty() {
        return Err(IndexError::NoDocuments(dir.to_path_buf()));
    }
    Ok(loaded)
}

fn load_file(path: &Path, kind: SourceKind) -> Result<String, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    match kind {
        SourceKind::Docx => extract_paragraphs(&bytes)
            .map(|paragraphs| paragraphs.join("\n"))
            .map_err(|e| e.to_string()),
        SourceKind::Pdf => pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string()),
        SourceKind::Text => String::from_utf8(bytes).map_err(|e| e.to_string()),
    }
}

fn relative_name(dir: &Path, path: &Path) -> String {
    path.strip_prefix(dir)
        .map(PathBuf::from)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .into_owned()
}
