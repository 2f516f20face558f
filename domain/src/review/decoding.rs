//! Decoding of model review responses into issues.
//!
//! The model is asked to answer with a bare JSON array of
//! `{clause_number, issue, severity, suggestion}` objects. Decoding is split
//! in two levels:
//!
//! | Failure | Scope | Result |
//! |---------|-------|--------|
//! | Response is not JSON, or not an array | whole batch | [`ResponseDecodeError`] |
//! | Element is not an object, or `clause_number` missing / out of range | one element | [`DiscardedIssue`] |
//!
//! Callers decide what a batch-level error means; the review orchestrator
//! treats it as "no issues in this batch".

use super::issue::{Issue, Severity};
use serde_json::Value;
use thiserror::Error;

/// Batch-level decode failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResponseDecodeError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("expected a JSON array, got {0}")]
    NotAnArray(&'static str),
}

/// Why a single element of the response array was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardReason {
    NotAnObject,
    MissingClauseNumber,
    InvalidClauseNumber(String),
    OutOfRange { clause_number: u64, unit_count: usize },
}

impl std::fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscardReason::NotAnObject => write!(f, "element is not an object"),
            DiscardReason::MissingClauseNumber => write!(f, "clause_number is missing"),
            DiscardReason::InvalidClauseNumber(raw) => {
                write!(f, "clause_number is not a positive integer: {}", raw)
            }
            DiscardReason::OutOfRange {
                clause_number,
                unit_count,
            } => write!(
                f,
                "clause_number {} is outside 1..={}",
                clause_number, unit_count
            ),
        }
    }
}

/// An element of the response array that did not yield an issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscardedIssue {
    /// 0-based position in the response array
    pub position: usize,
    pub reason: DiscardReason,
}

/// Successfully decoded response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedIssues {
    /// Retained issues in response order
    pub issues: Vec<Issue>,
    pub discarded: Vec<DiscardedIssue>,
}

/// Decode a model response against a document with `unit_count` units.
///
/// Accepts the array bare or wrapped in a single markdown code fence.
pub fn decode_issues(response: &str, unit_count: usize) -> Result<DecodedIssues, ResponseDecodeError> {
    let body = strip_code_fence(response);
    let value: Value =
        serde_json::from_str(body).map_err(|e| ResponseDecodeError::InvalidJson(e.to_string()))?;

    let Value::Array(elements) = value else {
        return Err(ResponseDecodeError::NotAnArray(json_kind(&value)));
    };

    let mut decoded = DecodedIssues::default();
    for (position, element) in elements.iter().enumerate() {
        match decode_element(element, unit_count) {
            Ok(issue) => decoded.issues.push(issue),
            Err(reason) => decoded.discarded.push(DiscardedIssue { position, reason }),
        }
    }
    Ok(decoded)
}

fn decode_element(element: &Value, unit_count: usize) -> Result<Issue, DiscardReason> {
    let Value::Object(fields) = element else {
        return Err(DiscardReason::NotAnObject);
    };

    let raw = fields
        .get("clause_number")
        .filter(|v| !v.is_null())
        .ok_or(DiscardReason::MissingClauseNumber)?;
    let clause_number = clause_number_of(raw)?;

    if clause_number == 0 || clause_number > unit_count as u64 {
        return Err(DiscardReason::OutOfRange {
            clause_number,
            unit_count,
        });
    }

    Ok(Issue {
        clause_number: clause_number as usize,
        issue: text_field(fields.get("issue")),
        severity: fields
            .get("severity")
            .and_then(Value::as_str)
            .map(Severity::parse_lenient)
            .unwrap_or_default(),
        suggestion: text_field(fields.get("suggestion")),
    })
}

fn clause_number_of(raw: &Value) -> Result<u64, DiscardReason> {
    if let Some(n) = raw.as_u64() {
        return Ok(n);
    }
    // Integral floats such as `2.0`
    if let Some(f) = raw.as_f64()
        && f >= 0.0
        && f.fract() == 0.0
        && f <= u32::MAX as f64
    {
        return Ok(f as u64);
    }
    Err(DiscardReason::InvalidClauseNumber(raw.to_string()))
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    }
}

fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") after the opening backticks
    let body = body.trim_start();
    if body.starts_with(|c: char| c.is_ascii_alphabetic()) {
        let info_end = body.find(char::is_whitespace).unwrap_or(body.len());
        return body[info_end..].trim();
    }
    body.trim()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
