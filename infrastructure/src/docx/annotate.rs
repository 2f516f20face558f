//! Paragraph rewriting: comment anchors and run highlighting

use super::error::{DocxError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

const PART: &str = "word/document.xml";

const HIGHLIGHT: &str = r#"<w:highlight w:val="yellow"/>"#;

/// `w:rPr` children that must follow `w:highlight`
const AFTER_HIGHLIGHT: [&[u8]; 14] = [
    b"w:u",
    b"w:effect",
    b"w:bdr",
    b"w:shd",
    b"w:fitText",
    b"w:vertAlign",
    b"w:rtl",
    b"w:cs",
    b"w:em",
    b"w:lang",
    b"w:eastAsianLayout",
    b"w:specVanish",
    b"w:oMath",
    b"w:rPrChange",
];

/// Pending edit: replace `start..end` of the paragraph with `text`
#[derive(Debug)]
struct Edit {
    start: usize,
    end: usize,
    text: String,
}

impl Edit {
    fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            start: at,
            end: at,
            text: text.into(),
        }
    }
}

#[derive(Debug, Default)]
struct RunState {
    /// Depth of the `w:r` element
    depth: usize,
    /// Position right after the run's start tag
    body_start: usize,
    seen_child: bool,
    in_rpr: bool,
    highlight_placed: bool,
}

/// Anchor `comment_ids` on a single `w:p` element and highlight its runs
///
/// The ranges open before the first content child (after `w:pPr`) and
/// close just before `</w:p>`, each followed by its reference run.
pub fn annotate_paragraph(paragraph: &str, comment_ids: &[u32]) -> Result<String> {
    if comment_ids.is_empty() {
        return Ok(paragraph.to_string());
    }

    let range_starts: String = comment_ids
        .iter()
        .map(|id| format!(r#"<w:commentRangeStart w:id="{id}"/>"#))
        .collect();
    let range_ends: String = comment_ids
        .iter()
        .map(|id| {
            format!(
                r#"<w:commentRangeEnd w:id="{id}"/><w:r><w:commentReference w:id="{id}"/></w:r>"#
            )
        })
        .collect();

    // <w:p/> has nowhere to put content; expand it first
    if let Some(open) = expand_empty_paragraph(paragraph) {
        return Ok(format!("{open}{range_starts}{range_ends}</w:p>"));
    }

    let mut reader = Reader::from_str(paragraph);
    let mut edits = Vec::new();
    let mut depth = 0usize;
    let mut anchored = false;
    let mut run: Option<RunState> = None;

    loop {
        let before = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| DocxError::xml(PART, e))?;
        let after = reader.buffer_position() as usize;

        match event {
            Event::Start(e) => {
                let name = e.name();
                let name = name.as_ref();
                if depth == 1 && !anchored && name != b"w:pPr" {
                    edits.push(Edit::insert(before, range_starts.clone()));
                    anchored = true;
                }
                visit_run_child(&mut run, &mut edits, depth, name, before, false);
                depth += 1;
                if name == b"w:r" && run.is_none() {
                    run = Some(RunState {
                        depth,
                        body_start: after,
                        ..RunState::default()
                    });
                }
            }
            Event::Empty(e) => {
                let name = e.name();
                let name = name.as_ref();
                if depth == 1 && !anchored && name != b"w:pPr" {
                    edits.push(Edit::insert(before, range_starts.clone()));
                    anchored = true;
                }
                visit_run_child(&mut run, &mut edits, depth, name, before, true);
                if let Some(state) = run.as_mut()
                    && state.depth == depth
                    && name == b"w:rPr"
                    && !state.highlight_placed
                {
                    edits.push(Edit {
                        start: before,
                        end: after,
                        text: format!("<w:rPr>{HIGHLIGHT}</w:rPr>"),
                    });
                    state.highlight_placed = true;
                }
            }
            Event::End(e) => {
                let name = e.name();
                let name = name.as_ref();
                if let Some(state) = run.as_mut() {
                    if name == b"w:rPr" && state.in_rpr && depth == state.depth + 1 {
                        if !state.highlight_placed {
                            edits.push(Edit::insert(before, HIGHLIGHT));
                            state.highlight_placed = true;
                        }
                        state.in_rpr = false;
                    } else if name == b"w:r" && depth == state.depth {
                        run = None;
                    }
                }
                if depth == 1 && name == b"w:p" {
                    if !anchored {
                        edits.push(Edit::insert(before, range_starts.clone()));
                    }
                    edits.push(Edit::insert(before, range_ends.clone()));
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(apply_edits(paragraph, edits))
}

/// Track the first child of the open run and the children of its `w:rPr`
fn visit_run_child(
    run: &mut Option<RunState>,
    edits: &mut Vec<Edit>,
    depth: usize,
    name: &[u8],
    before: usize,
    empty: bool,
) {
    let Some(state) = run.as_mut() else { return };

    if depth == state.depth && !state.seen_child {
        state.seen_child = true;
        if name == b"w:rPr" {
            state.in_rpr = !empty;
        } else {
            edits.push(Edit::insert(
                state.body_start,
                format!("<w:rPr>{HIGHLIGHT}</w:rPr>"),
            ));
            state.highlight_placed = true;
        }
        return;
    }

    if state.in_rpr && depth == state.depth + 1 && !state.highlight_placed {
        if name == b"w:highlight" {
            state.highlight_placed = true;
        } else if AFTER_HIGHLIGHT.contains(&name) {
            edits.push(Edit::insert(before, HIGHLIGHT));
            state.highlight_placed = true;
        }
    }
}

/// Turn `<w:p .../>` into its opening tag, or `None` for a non-empty paragraph
fn expand_empty_paragraph(paragraph: &str) -> Option<String> {
    let trimmed = paragraph.trim_end();
    let head = trimmed.strip_suffix("/>")?;
    if head.contains('>') {
        return None;
    }
    Some(format!("{}>", head.trim_end()))
}

fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    // stable: insertions at the same point keep their push order
    edits.sort_by_key(|e| e.start);

    let extra: usize = edits.iter().map(|e| e.text.len()).sum();
    let mut out = String::with_capacity(source.len() + extra);
    let mut cursor = 0;
    for edit in edits {
        if edit.start < cursor {
            continue;
        }
        out.push_str(&source[cursor..edit.start]);
        out.push_str(&edit.text);
        cursor = edit.end;
    }
    out.push_str(&source[cursor..]);
    out
}
