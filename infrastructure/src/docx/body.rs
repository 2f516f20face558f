//! Body paragraph scanning for `word/document.xml`

use super::error::{DocxError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

const PART: &str = "word/document.xml";

/// A top-level body paragraph: its byte span in the part and its text
#[derive(Debug, Clone, PartialEq)]
pub struct BodyParagraph {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Collect every `w:p` that is a direct child of `w:body`
///
/// Paragraphs inside tables, text boxes and other containers are not part
/// of the reviewed sequence. Text is the concatenation of `w:t` runs, with
/// `w:tab` as a tab and `w:br`/`w:cr` as a newline. Only run content counts,
/// so tab stops declared in `w:pPr/w:tabs` add nothing.
pub fn scan_paragraphs(xml: &str) -> Result<Vec<BodyParagraph>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();

    // open elements below w:body; None until the body starts
    let mut body_depth: Option<usize> = None;
    let mut current: Option<(usize, String)> = None;
    let mut in_text = false;
    // open w:r elements inside the current paragraph
    let mut run_depth = 0usize;

    loop {
        let before = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| DocxError::xml(PART, e))?;
        let after = reader.buffer_position() as usize;

        match event {
            Event::Start(e) => {
                let name = e.name();
                match body_depth {
                    None if name.as_ref() == b"w:body" => body_depth = Some(0),
                    None => {}
                    Some(depth) => {
                        if depth == 0 && name.as_ref() == b"w:p" {
                            current = Some((before, String::new()));
                            run_depth = 0;
                        }
                        if current.is_some() {
                            match name.as_ref() {
                                b"w:r" => run_depth += 1,
                                b"w:t" if run_depth > 0 => in_text = true,
                                _ => {}
                            }
                        }
                        body_depth = Some(depth + 1);
                    }
                }
            }
            Event::Empty(e) => {
                let Some(depth) = body_depth else { continue };
                match e.name().as_ref() {
                    b"w:p" if depth == 0 => paragraphs.push(BodyParagraph {
                        start: before,
                        end: after,
                        text: String::new(),
                    }),
                    b"w:tab" if run_depth > 0 => {
                        if let Some((_, text)) = current.as_mut() {
                            text.push('\t');
                        }
                    }
                    b"w:br" | b"w:cr" if run_depth > 0 => {
                        if let Some((_, text)) = current.as_mut() {
                            text.push('\n');
                        }
                    }
                    _ => {}
                }
            }
            Event::End(e) => {
                let Some(depth) = body_depth else { continue };
                if depth == 0 {
                    // </w:body>
                    body_depth = None;
                    continue;
                }
                body_depth = Some(depth - 1);
                match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:r" => run_depth = run_depth.saturating_sub(1),
                    b"w:p" if depth == 1 => {
                        if let Some((start, text)) = current.take() {
                            paragraphs.push(BodyParagraph {
                                start,
                                end: after,
                                text,
                            });
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(e) if in_text => {
                if let Some((_, text)) = current.as_mut() {
                    let unescaped = e.unescape().map_err(|e| DocxError::xml(PART, e))?;
                    text.push_str(&unescaped);
                }
            }
            Event::CData(e) if in_text => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
