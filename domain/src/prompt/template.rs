//! Prompt templates for the compliance review flow

use crate::document::unit::DocumentUnit;

/// Templates for generating review prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the clause reviewer
    pub fn review_system() -> &'static str {
        r#"You are an expert ADGM legal assistant.
Your task is to review batches of legal document clauses based ONLY on the provided ADGM regulations context.
You answer with machine-readable JSON and nothing else."#
    }

    /// User prompt for one batch: retrieved context plus the clauses to review
    pub fn review_prompt(context: &str, clauses: &str) -> String {
        format!(
            r#"**ADGM Regulations Context:**
{}

**Document Clauses to Review:**
{}

**Task:**
Review each clause in the batch for red flags such as incorrect jurisdiction, missing information, or non-compliant language according to the context.
For each clause that has an issue, identify the problem and suggest a fix.

**Output Format:**
Respond ONLY with a single, valid JSON array of objects. Each object represents one issue you found.
- If you find issues, use this format for each issue:
{{"clause_number": <The number of the clause with the issue>, "issue": "A brief description of the problem.", "severity": "High/Medium/Low", "suggestion": "A concise suggestion to fix the issue."}}
- If you find no issues at all in the entire batch, respond with an empty JSON array: []"#,
            context, clauses
        )
    }
}

/// Render units as numbered clauses.
///
/// Numbers are the units' document-wide indices, not positions within the
/// batch, so the model's `clause_number` maps straight back to a unit.
pub fn format_clauses(units: &[DocumentUnit]) -> String {
    units
        .iter()
        .map(|unit| format!("Clause {}:\n\"\"\"\n{}\n\"\"\"", unit.index, unit.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(index: usize, text: &str) -> DocumentUnit {
        DocumentUnit {
            index,
            paragraph: index + 3,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_format_clauses_uses_document_indices() {
        let clauses = format_clauses(&[
            unit(3, "The company is governed by the laws of Dubai."),
            unit(4, "Directors are appointed by ordinary resolution."),
        ]);
        assert_eq!(
            clauses,
            "Clause 3:\n\"\"\"\nThe company is governed by the laws of Dubai.\n\"\"\"\n\n\
             Clause 4:\n\"\"\"\nDirectors are appointed by ordinary resolution.\n\"\"\""
        );
    }

    #[test]
    fn test_review_prompt_contains_context_and_clauses() {
        let prompt = PromptTemplate::review_prompt("Section 12: ADGM Courts", "Clause 1:\n\"\"\"\nx\n\"\"\"");
        assert!(prompt.contains("Section 12: ADGM Courts"));
        assert!(prompt.contains("Clause 1:"));
        assert!(prompt.contains("\"clause_number\""));
        assert!(prompt.contains("empty JSON array: []"));
    }
}
