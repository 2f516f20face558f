//! Regulation retrieval configuration from TOML (`[retrieval]` section)

use crate::rag::{RegulationSource, TextSplitter};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One regulation document to download into the sources directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSourceConfig {
    /// File name under `sources_dir`; its extension selects the loader
    pub name: String,
    pub url: String,
}

impl FileSourceConfig {
    fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// ADGM reference documents indexed when no sources are configured
pub fn default_sources() -> Vec<FileSourceConfig> {
    vec![
        FileSourceConfig::new(
            "Resolution_Incorporate_LTD.docx",
            "https://assets.adgm.com/download/assets/adgm-ra-resolution-multiple-incorporate-shareholders-LTD-incorporation-v2.docx/186a12846c3911efa4e6c6223862cd87",
        ),
        FileSourceConfig::new(
            "Checklist_Private_Company.pdf",
            "https://www.adgm.com/documents/registration-authority/registration-and-incorporation/checklist/private-company-limited-by-guarantee-non-financial-services-20231228.pdf",
        ),
        FileSourceConfig::new(
            "Standard_Employment_Contract_2024.docx",
            "https://assets.adgm.com/download/assets/ADGM+Standard+Employment+Contract+Template++ER+2024+(Feb+2025).docx/ee14b252edbe11efa63b12b3a30e5e3a",
        ),
        FileSourceConfig::new(
            "Guidance_And_Policy.html",
            "https://www.adgm.com/legal-framework/guidance-and-policy-statements",
        ),
        FileSourceConfig::new(
            "Annual_Filings.html",
            "https://www.adgm.com/operating-in-adgm/obligations-of-adgm-registered-entities/annual-filings/annual-accounts",
        ),
    ]
}

/// Raw retrieval configuration
///
/// # Example
///
/// ```toml
/// [retrieval]
/// sources_dir = "data/adgm_sources"
/// index_path = "data/adgm_index"
/// chunk_size = 1000
/// chunk_overlap = 150
/// top_k = 4
///
/// [[retrieval.sources]]
/// name = "Annual_Filings.html"
/// url = "https://www.adgm.com/operating-in-adgm/obligations-of-adgm-registered-entities/annual-filings/annual-accounts"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    /// Directory holding downloaded regulation documents
    pub sources_dir: PathBuf,
    /// LanceDB directory holding the vector index
    pub index_path: PathBuf,
    /// Characters per chunk
    pub chunk_size: usize,
    /// Characters shared by consecutive chunks
    pub chunk_overlap: usize,
    /// Passages returned per query
    pub top_k: usize,
    pub download_timeout_secs: u64,
    pub sources: Vec<FileSourceConfig>,
}

impl FileRetrievalConfig {
    pub fn regulation_sources(&self) -> Vec<RegulationSource> {
        self.sources
            .iter()
            .map(|s| RegulationSource::new(&s.name, &s.url))
            .collect()
    }

    pub fn splitter(&self) -> TextSplitter {
        TextSplitter::new(self.chunk_size, self.chunk_overlap)
    }
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        Self {
            sources_dir: PathBuf::from("data/adgm_sources"),
            index_path: PathBuf::from("data/adgm_index"),
            chunk_size: 1000,
            chunk_overlap: 150,
            top_k: 4,
            download_timeout_secs: 30,
            sources: default_sources(),
        }
    }
}
