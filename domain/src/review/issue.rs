//! Compliance issue entities

use serde::{Deserialize, Serialize};

/// Severity of a compliance issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Severity {
    High,
    #[default]
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    /// Lenient parse used for model output: case-insensitive, anything
    /// unrecognized falls back to `Medium`.
    pub fn parse_lenient(s: &str) -> Severity {
        s.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            other => Err(format!("unknown severity: {}", other)),
        }
    }
}

/// A finding reported by the model for one clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// 1-based index into the document's units
    pub clause_number: usize,
    pub issue: String,
    pub severity: Severity,
    pub suggestion: String,
}

impl Issue {
    /// Text of the inline comment attached to the flagged paragraph
    pub fn comment_text(&self) -> String {
        format!("Issue: {}\nSuggestion: {}", self.issue, self.suggestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parse_case_insensitive() {
        assert_eq!("HIGH".parse::<Severity>().unwrap(), Severity::High);
        assert_eq!(" low ".parse::<Severity>().unwrap(), Severity::Low);
        assert!("critical".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_lenient_defaults_to_medium() {
        assert_eq!(Severity::parse_lenient("critical"), Severity::Medium);
        assert_eq!(Severity::parse_lenient(""), Severity::Medium);
        assert_eq!(Severity::parse_lenient("High"), Severity::High);
    }

    #[test]
    fn test_comment_text() {
        let issue = Issue {
            clause_number: 1,
            issue: "Refers to UAE Federal Courts".to_string(),
            severity: Severity::High,
            suggestion: "Refer to ADGM Courts".to_string(),
        };
        assert_eq!(
            issue.comment_text(),
            "Issue: Refers to UAE Federal Courts\nSuggestion: Refer to ADGM Courts"
        );
    }
}
