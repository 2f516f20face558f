//! Document type value object and filename keyword matching

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Regulatory document types recognized from uploaded filenames (Value Object)
///
/// Declaration order matters: [`DocumentType::from_filename`] returns the
/// first type whose keywords match, and `Ord` follows the same order so that
/// sets of document types serialize deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentType {
    // Company incorporation
    ArticlesOfAssociation,
    MemorandumOfAssociation,
    BoardResolutionForIncorporation,
    UboDeclarationForm,
    RegisterOfMembersAndDirectors,
    // Financial services licensing
    ApplicationForFsp,
    BusinessPlan,
    FinancialProjections,
    ComplianceManual,
    AmlPolicy,
    ControllersAndAuthorisedIndividualsForms,
    // Annual filing
    AnnualReturn,
    AnnualAccounts,
    /// Filename did not match any keyword
    Unknown,
}

impl DocumentType {
    /// All recognizable types in matching order (excludes `Unknown`)
    pub const RECOGNIZED: [DocumentType; 13] = [
        DocumentType::ArticlesOfAssociation,
        DocumentType::MemorandumOfAssociation,
        DocumentType::BoardResolutionForIncorporation,
        DocumentType::UboDeclarationForm,
        DocumentType::RegisterOfMembersAndDirectors,
        DocumentType::ApplicationForFsp,
        DocumentType::BusinessPlan,
        DocumentType::FinancialProjections,
        DocumentType::ComplianceManual,
        DocumentType::AmlPolicy,
        DocumentType::ControllersAndAuthorisedIndividualsForms,
        DocumentType::AnnualReturn,
        DocumentType::AnnualAccounts,
    ];

    /// Human-readable name, as used in checklists and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::ArticlesOfAssociation => "Articles of Association",
            DocumentType::MemorandumOfAssociation => "Memorandum of Association",
            DocumentType::BoardResolutionForIncorporation => "Board Resolution for Incorporation",
            DocumentType::UboDeclarationForm => "UBO Declaration Form",
            DocumentType::RegisterOfMembersAndDirectors => "Register of Members and Directors",
            DocumentType::ApplicationForFsp => "Application for FSP",
            DocumentType::BusinessPlan => "Business Plan",
            DocumentType::FinancialProjections => "Financial Projections",
            DocumentType::ComplianceManual => "Compliance Manual",
            DocumentType::AmlPolicy => "AML Policy",
            DocumentType::ControllersAndAuthorisedIndividualsForms => {
                "Controllers and Authorised Individuals Forms"
            }
            DocumentType::AnnualReturn => "Annual Return",
            DocumentType::AnnualAccounts => "Annual Accounts",
            DocumentType::Unknown => "Unknown Document",
        }
    }

    /// Lowercase keywords that identify this type inside a filename
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            DocumentType::ArticlesOfAssociation => &["articles", "aoa"],
            DocumentType::MemorandumOfAssociation => &["memorandum", "moa", "mou"],
            DocumentType::BoardResolutionForIncorporation => &["resolution", "board"],
            DocumentType::UboDeclarationForm => &["ubo", "beneficial owner"],
            DocumentType::RegisterOfMembersAndDirectors => &["register", "members", "directors"],
            DocumentType::ApplicationForFsp => {
                &["fsp", "permission", "license application", "licence"]
            }
            DocumentType::BusinessPlan => &["business plan", "b-plan"],
            DocumentType::FinancialProjections => &["financial", "projection", "forecast"],
            DocumentType::ComplianceManual => &["compliance manual", "compliance policy"],
            DocumentType::AmlPolicy => &["aml", "anti-money", "cft"],
            DocumentType::ControllersAndAuthorisedIndividualsForms => {
                &["controller", "authorised individual", "authorized"]
            }
            DocumentType::AnnualReturn => &["annual return", "confirmation statement"],
            DocumentType::AnnualAccounts => &["annual accounts", "financial statements"],
            DocumentType::Unknown => &[],
        }
    }

    /// Infer the document type from a filename.
    ///
    /// Case-insensitive substring match; the first type (in declaration
    /// order) with a matching keyword wins. Unmatched names are `Unknown`.
    pub fn from_filename(filename: &str) -> DocumentType {
        let lower = filename.to_lowercase();
        Self::RECOGNIZED
            .into_iter()
            .find(|doc_type| doc_type.keywords().iter().any(|kw| lower.contains(kw)))
            .unwrap_or(DocumentType::Unknown)
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::RECOGNIZED
            .into_iter()
            .find(|doc_type| doc_type.as_str().eq_ignore_ascii_case(s))
            .unwrap_or(DocumentType::Unknown))
    }
}

impl Serialize for DocumentType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DocumentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        // FromStr is infallible
        Ok(s.parse().unwrap_or(DocumentType::Unknown))
    }
}
