//! `.docx` reading and annotation
//!
//! Uploads are parsed as WordprocessingML packages. Only body-level
//! paragraphs take part in review; comments are written to
//! `word/comments.xml` and anchored around the whole paragraph, whose runs
//! are highlighted yellow.

mod annotate;
mod body;
mod codec;
mod comments;
mod error;
mod package;

pub use codec::{DocxCodec, DocxDocument, extract_paragraphs};
pub use error::DocxError;
pub use package::DocxPackage;

#[cfg(test)]
pub(crate) use codec::tests::build_docx;
