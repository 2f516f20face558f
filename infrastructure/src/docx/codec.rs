//! `.docx` implementation of the document codec

use super::annotate::annotate_paragraph;
use super::body::{BodyParagraph, scan_paragraphs};
use super::comments::{
    CommentEntry, empty_relationships, ensure_comments_content_type,
    ensure_comments_relationship, next_comment_id, write_comments,
};
use super::error::{DocxError, Result};
use super::package::{
    COMMENTS_PART, CONTENT_TYPES_PART, DOCUMENT_PART, DOCUMENT_RELS_PART, DocxPackage,
};
use chrono::Utc;
use corporate_agent_application::ports::document::{DocumentCodec, DocumentError, ReviewDocument};
use std::path::Path;
use tracing::debug;

/// Opens `.docx` uploads
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxCodec;

impl DocxCodec {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentCodec for DocxCodec {
    fn open(
        &self,
        name: &str,
        bytes: Vec<u8>,
    ) -> std::result::Result<Box<dyn ReviewDocument>, DocumentError> {
        if !is_docx(name) {
            return Err(DocumentError::UnsupportedFormat(name.to_string()));
        }
        let document = DocxDocument::from_bytes(&bytes)?;
        debug!(
            "Opened {} ({} body paragraphs)",
            name,
            document.paragraphs.len()
        );
        Ok(Box::new(document))
    }
}

fn is_docx(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
}

#[derive(Debug, Clone)]
struct PendingComment {
    paragraph: usize,
    text: String,
    author: String,
}

/// An opened `.docx` package with queued comments
#[derive(Debug, Clone)]
pub struct DocxDocument {
    package: DocxPackage,
    document_xml: String,
    spans: Vec<BodyParagraph>,
    paragraphs: Vec<String>,
    pending: Vec<PendingComment>,
}

impl DocxDocument {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let package = DocxPackage::from_bytes(bytes)?;
        let document_xml = part_text(&package, DOCUMENT_PART)?
            .ok_or(DocxError::MissingPart(DOCUMENT_PART))?;
        let spans = scan_paragraphs(&document_xml)?;
        let paragraphs = spans.iter().map(|p| p.text.clone()).collect();

        Ok(Self {
            package,
            document_xml,
            spans,
            paragraphs,
            pending: Vec::new(),
        })
    }

    /// Package with every queued comment applied
    pub fn annotated_package(&self) -> Result<DocxPackage> {
        let mut package = self.package.clone();
        if self.pending.is_empty() {
            return Ok(package);
        }

        let existing_comments = part_text(&self.package, COMMENTS_PART)?;
        let first_id = next_comment_id(existing_comments.as_deref())?;

        // ids follow queue order
        let ids: Vec<u32> = (first_id..=u32::MAX).take(self.pending.len()).collect();
        if ids.len() < self.pending.len() {
            return Err(DocxError::xml(COMMENTS_PART, "comment ids exhausted"));
        }

        let mut document =
            String::with_capacity(self.document_xml.len() + self.pending.len() * 256);
        let mut cursor = 0;
        for (index, span) in self.spans.iter().enumerate() {
            let anchored: Vec<u32> = self
                .pending
                .iter()
                .zip(&ids)
                .filter(|(c, _)| c.paragraph == index)
                .map(|(_, id)| *id)
                .collect();
            if anchored.is_empty() {
                continue;
            }
            document.push_str(&self.document_xml[cursor..span.start]);
            document.push_str(&annotate_paragraph(
                &self.document_xml[span.start..span.end],
                &anchored,
            )?);
            cursor = span.end;
        }
        document.push_str(&self.document_xml[cursor..]);
        package.set_part(DOCUMENT_PART, document.into_bytes());

        let entries: Vec<CommentEntry<'_>> = self
            .pending
            .iter()
            .zip(&ids)
            .map(|(c, id)| CommentEntry {
                id: *id,
                author: &c.author,
                text: &c.text,
            })
            .collect();
        let comments = write_comments(existing_comments.as_deref(), &entries, Utc::now())?;
        package.set_part(COMMENTS_PART, comments.into_bytes());

        let rels = part_text(&self.package, DOCUMENT_RELS_PART)?
            .unwrap_or_else(|| empty_relationships().to_string());
        package.set_part(
            DOCUMENT_RELS_PART,
            ensure_comments_relationship(&rels)?.into_bytes(),
        );

        let types = part_text(&self.package, CONTENT_TYPES_PART)?
            .ok_or(DocxError::MissingPart(CONTENT_TYPES_PART))?;
        package.set_part(
            CONTENT_TYPES_PART,
            ensure_comments_content_type(&types)?.into_bytes(),
        );

        Ok(package)
    }
}

impl ReviewDocument for DocxDocument {
    fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    fn annotate(
        &mut self,
        paragraph: usize,
        comment: &str,
        author: &str,
    ) -> std::result::Result<(), DocumentError> {
        if paragraph >= self.paragraphs.len() {
            return Err(DocumentError::ParagraphOutOfRange {
                index: paragraph,
                count: self.paragraphs.len(),
            });
        }
        self.pending.push(PendingComment {
            paragraph,
            text: comment.to_string(),
            author: author.to_string(),
        });
        Ok(())
    }

    fn annotation_count(&self) -> usize {
        self.pending.len()
    }

    fn persist(&self, path: &Path) -> std::result::Result<(), DocumentError> {
        self.annotated_package()?.save(path)?;
        debug!(
            "Wrote {} with {} comment(s)",
            path.display(),
            self.pending.len()
        );
        Ok(())
    }
}

/// Body paragraph text of a `.docx` file, for building the regulation index
pub fn extract_paragraphs(bytes: &[u8]) -> Result<Vec<String>> {
    let package = DocxPackage::from_bytes(bytes)?;
    let xml = part_text(&package, DOCUMENT_PART)?.ok_or(DocxError::MissingPart(DOCUMENT_PART))?;
    Ok(scan_paragraphs(&xml)?.into_iter().map(|p| p.text).collect())
}

fn part_text(package: &DocxPackage, name: &'static str) -> Result<Option<String>> {
    package
        .part(name)
        .map(|data| String::from_utf8(data.to_vec()).map_err(|_| DocxError::Encoding(name)))
        .transpose()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::docx::body::tests::document_xml;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;
    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

    /// Minimal `.docx` bytes with one body paragraph per entry
    pub(crate) fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{p}</w:t></w:r></w:p>"))
            .collect();
        let mut package = DocxPackage::default();
        package.set_part(CONTENT_TYPES_PART, CONTENT_TYPES.as_bytes().to_vec());
        package.set_part(DOCUMENT_PART, document_xml(&body).into_bytes());
        package.set_part(DOCUMENT_RELS_PART, RELS.as_bytes().to_vec());
        package.to_bytes().unwrap()
    }

    fn part(package: &DocxPackage, name: &'static str) -> String {
        part_text(package, name).unwrap().unwrap()
    }

    #[test]
    fn test_open_lists_paragraphs() {
        let bytes = build_docx(&["Articles of Association", "", "Clause 1. Jurisdiction"]);
        let document = DocxCodec::new().open("AoA.docx", bytes).unwrap();
        assert_eq!(
            document.paragraphs(),
            ["Articles of Association", "", "Clause 1. Jurisdiction"]
        );
        assert_eq!(document.annotation_count(), 0);
    }

    #[test]
    fn test_rejects_other_formats() {
        let result = DocxCodec::new().open("scan.pdf", b"%PDF-1.7".to_vec());
        assert!(matches!(result, Err(DocumentError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_rejects_corrupt_package() {
        let result = DocxCodec::new().open("broken.docx", b"not a zip".to_vec());
        assert!(matches!(result, Err(DocumentError::Malformed(_))));
    }

    #[test]
    fn test_annotate_out_of_range() {
        let mut document = DocxDocument::from_bytes(&build_docx(&["only"])).unwrap();
        let result = document.annotate(1, "Issue: x", "Corporate Agent");
        assert!(matches!(
            result,
            Err(DocumentError::ParagraphOutOfRange { index: 1, count: 1 })
        ));
    }

    #[test]
    fn test_persist_writes_comments_and_highlight() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("REVIEWED_AoA.docx");

        let mut document = DocxDocument::from_bytes(&build_docx(&[
            "Title",
            "Disputes go to UAE Federal Courts.",
            "Signed by the director.",
        ]))
        .unwrap();
        document
            .annotate(1, "Issue: Wrong court\nSuggestion: Use ADGM Courts", "Corporate Agent")
            .unwrap();
        document
            .annotate(2, "Issue: Missing signature block", "Corporate Agent")
            .unwrap();
        document.persist(&path).unwrap();

        let written = DocxPackage::from_bytes(&std::fs::read(&path).unwrap()).unwrap();
        let body = part(&written, DOCUMENT_PART);
        assert!(body.contains(r#"<w:commentRangeStart w:id="0"/>"#));
        assert!(body.contains(r#"<w:commentReference w:id="1"/>"#));
        assert_eq!(body.matches(r#"<w:highlight w:val="yellow"/>"#).count(), 2);

        let comments = part(&written, COMMENTS_PART);
        assert!(comments.contains("Issue: Wrong court"));
        assert!(comments.contains("Suggestion: Use ADGM Courts"));
        assert!(comments.contains(r#"w:author="Corporate Agent""#));
        assert!(part(&written, DOCUMENT_RELS_PART).contains("comments.xml"));
        assert!(part(&written, CONTENT_TYPES_PART).contains("/word/comments.xml"));

        // text is unchanged by annotation
        let reopened = DocxCodec::new()
            .open("REVIEWED_AoA.docx", std::fs::read(&path).unwrap())
            .unwrap();
        assert_eq!(reopened.paragraphs()[1], "Disputes go to UAE Federal Courts.");
    }

    #[test]
    fn test_persist_without_comments_copies_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("REVIEWED_clean.docx");
        let document = DocxDocument::from_bytes(&build_docx(&["Fine clause"])).unwrap();
        document.persist(&path).unwrap();

        let written = DocxPackage::from_bytes(&std::fs::read(&path).unwrap()).unwrap();
        assert!(!written.has_part(COMMENTS_PART));
        assert!(!part(&written, DOCUMENT_PART).contains("commentRangeStart"));
    }

    #[test]
    fn test_second_review_extends_comments() {
        let mut first = DocxDocument::from_bytes(&build_docx(&["Clause one"])).unwrap();
        first.annotate(0, "Issue: first", "Corporate Agent").unwrap();
        let bytes = first.annotated_package().unwrap().to_bytes().unwrap();

        let mut second = DocxDocument::from_bytes(&bytes).unwrap();
        second.annotate(0, "Issue: second", "Corporate Agent").unwrap();
        let package = second.annotated_package().unwrap();

        let comments = part(&package, COMMENTS_PART);
        assert!(comments.contains(r#"w:id="0""#));
        assert!(comments.contains(r#"w:id="1""#));
        assert_eq!(part(&package, DOCUMENT_RELS_PART).matches("comments.xml").count(), 1);
        assert_eq!(
            part(&package, CONTENT_TYPES_PART)
                .matches("/word/comments.xml")
                .count(),
            1
        );
    }

    #[test]
    fn test_extract_paragraphs() {
        let texts = extract_paragraphs(&build_docx(&["Rule 1", "Rule 2"])).unwrap();
        assert_eq!(texts, vec!["Rule 1", "Rule 2"]);
    }
}
