//! Comments part and the package entries that register it

use super::error::{DocxError, Result};
use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;

const COMMENTS_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/comments";
const COMMENTS_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.comments+xml";

const EMPTY_COMMENTS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    "\n",
    r#"<w:comments xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"></w:comments>"#
);

/// One comment to be written to `word/comments.xml`
#[derive(Debug, Clone)]
pub struct CommentEntry<'a> {
    pub id: u32,
    pub author: &'a str,
    pub text: &'a str,
}

/// Next free comment id in an existing comments part
pub fn next_comment_id(comments_xml: Option<&str>) -> Result<u32> {
    let Some(xml) = comments_xml else {
        return Ok(0);
    };

    let mut reader = Reader::from_str(xml);
    let mut next = 0;
    loop {
        match reader
            .read_event()
            .map_err(|e| DocxError::xml("word/comments.xml", e))?
        {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"w:comment" => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"w:id"
                        && let Ok(id) = std::str::from_utf8(&attr.value)
                            .unwrap_or_default()
                            .parse::<u32>()
                    {
                        let following = id.checked_add(1).ok_or_else(|| {
                            DocxError::xml("word/comments.xml", "comment ids exhausted")
                        })?;
                        next = next.max(following);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(next)
}

/// Author initials, e.g. "Corporate Agent" -> "CA"
pub fn initials(author: &str) -> String {
    author
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

fn comment_xml(entry: &CommentEntry<'_>, date: &str) -> String {
    let mut xml = format!(
        r#"<w:comment w:id="{}" w:author="{}" w:date="{}" w:initials="{}">"#,
        entry.id,
        escape(entry.author),
        date,
        escape(&initials(entry.author)),
    );

    // one w:p per line; the first carries the annotation mark
    let mut lines = entry.text.lines().peekable();
    if lines.peek().is_none() {
        xml.push_str("<w:p><w:r><w:annotationRef/></w:r></w:p>");
    }
    for (i, line) in lines.enumerate() {
        xml.push_str("<w:p>");
        if i == 0 {
            xml.push_str("<w:r><w:annotationRef/></w:r>");
        }
        xml.push_str(&format!(
            r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
            escape(line)
        ));
    }

    xml.push_str("</w:comment>");
    xml
}

/// Append `entries` to an existing comments part, or create one
pub fn write_comments(
    existing: Option<&str>,
    entries: &[CommentEntry<'_>],
    now: DateTime<Utc>,
) -> Result<String> {
    let base = existing.unwrap_or(EMPTY_COMMENTS);
    let date = now.format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let added: String = entries.iter().map(|e| comment_xml(e, &date)).collect();

    if let Some(close) = base.rfind("</w:comments>") {
        return Ok(format!("{}{}{}", &base[..close], added, &base[close..]));
    }

    // <w:comments .../> with no children
    let Some(open) = base.rfind("<w:comments") else {
        return Err(DocxError::MissingPart("w:comments element"));
    };
    let Some(self_close) = base[open..].find("/>").map(|i| open + i) else {
        return Err(DocxError::xml("word/comments.xml", "unterminated w:comments"));
    };
    Ok(format!(
        "{}>{}</w:comments>{}",
        base[..self_close].trim_end(),
        added,
        &base[self_close + 2..]
    ))
}

/// Register the comments part in the document relationships if missing
pub fn ensure_comments_relationship(rels_xml: &str) -> Result<String> {
    if rels_xml.contains(COMMENTS_TYPE) {
        return Ok(rels_xml.to_string());
    }
    let Some(close) = rels_xml.rfind("</Relationships>") else {
        return Err(DocxError::xml(
            "word/_rels/document.xml.rels",
            "missing </Relationships>",
        ));
    };

    let id = (1..)
        .map(|n| format!("rId{n}"))
        .find(|id| !rels_xml.contains(&format!(r#"Id="{id}""#)))
        .unwrap_or_else(|| "rIdComments".to_string());

    Ok(format!(
        r#"{}<Relationship Id="{id}" Type="{COMMENTS_TYPE}" Target="comments.xml"/>{}"#,
        &rels_xml[..close],
        &rels_xml[close..]
    ))
}

/// Declare the comments content type if missing
pub fn ensure_comments_content_type(types_xml: &str) -> Result<String> {
    if types_xml.contains("/word/comments.xml") {
        return Ok(types_xml.to_string());
    }
    let Some(close) = types_xml.rfind("</Types>") else {
        return Err(DocxError::xml("[Content_Types].xml", "missing </Types>"));
    };
    Ok(format!(
        r#"{}<Override PartName="/word/comments.xml" ContentType="{COMMENTS_CONTENT_TYPE}"/>{}"#,
        &types_xml[..close],
        &types_xml[close..]
    ))
}

/// Empty relationships part for packages that lack one
pub fn empty_relationships() -> &'static str {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"></Relationships>"#
    )
}
