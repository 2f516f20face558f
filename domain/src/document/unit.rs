//! Reviewable document units

use serde::{Deserialize, Serialize};

/// Paragraphs whose trimmed text is this many characters or fewer are not
/// reviewed (headings, signatures, blank lines).
pub const DEFAULT_MIN_PARAGRAPH_CHARS: usize = 20;

/// One reviewable text span of a document (a paragraph)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUnit {
    /// 1-based position among the filtered units; this is the clause number
    /// the model refers to
    pub index: usize,
    /// 0-based position among all body paragraphs of the source document
    pub paragraph: usize,
    pub text: String,
}

impl DocumentUnit {
    /// Excerpt used to locate the unit in reports
    pub fn section_excerpt(&self) -> String {
        format!(
            "Paragraph starting with: '{}...'",
            crate::util::char_prefix(&self.text, 50)
        )
    }
}

/// Extract reviewable units from a document's paragraphs, in order.
///
/// A paragraph qualifies when its trimmed length exceeds `min_chars`
/// characters. Units are numbered from 1 in document order.
pub fn segment<S: AsRef<str>>(paragraphs: &[S], min_chars: usize) -> Vec<DocumentUnit> {
    paragraphs
        .iter()
        .enumerate()
        .filter(|(_, text)| text.as_ref().trim().chars().count() > min_chars)
        .enumerate()
        .map(|(i, (paragraph, text))| DocumentUnit {
            index: i + 1,
            paragraph,
            text: text.as_ref().to_string(),
        })
        .collect()
}
