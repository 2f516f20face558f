//! Downloading regulation documents into the sources directory

use crate::fetch::html_to_text;
use corporate_agent_application::ports::document_source::DocumentSource;
use std::path::Path;
use tracing::{info, warn};

/// A regulation document and where to download it from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegulationSource {
    /// File name under the sources directory
    pub name: String,
    pub url: String,
}

impl RegulationSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    fn is_html(&self) -> bool {
        Path::new(&self.name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
    }
}

/// Download every source not already present in `dir`
///
/// HTML pages are stored as extracted text. Failed downloads are logged and
/// skipped. Returns the number of files written.
pub async fn download_missing(
    fetcher: &dyn DocumentSource,
    dir: &Path,
    sources: &[RegulationSource],
) -> std::io::Result<usize> {
    tokio::fs::create_dir_all(dir).await?;

    let mut written = 0;
    for source in sources {
        let path = dir.join(&source.name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            continue;
        }

        info!("Downloading {}...", source.name);
        let body = match fetcher.fetch(&source.url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Error downloading {}: {}", source.url, e);
                continue;
            }
        };

        let contents = if source.is_html() {
            html_to_text(&String::from_utf8_lossy(&body)).into_bytes()
        } else {
            body
        };

        if let Err(e) = tokio::fs::write(&path, contents).await {
            warn!("Could not write {}: {}", path.display(), e);
            continue;
        }
        written += 1;
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use corporate_agent_application::ports::document_source::FetchError;
    use std::sync::Mutex;

    struct StubSource {
        requested: Mutex<Vec<String>>,
    }

    impl StubSource {
        fn new() -> Self {
            Self {
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl DocumentSource for StubSource {
        async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
            self.requested.lock().unwrap().push(location.to_string());
            match location {
                "https://adgm.test/page" => Ok(
                    b"<html><body><h1>Annual accounts</h1><script>x()</script><p>File within nine months</p></body></html>"
                        .to_vec(),
                ),
                "https://adgm.test/template.docx" => Ok(b"PK-binary".to_vec()),
                other => Err(FetchError::Http {
                    status: 404,
                    location: other.to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_downloads_and_converts_html() {
        let dir = tempfile::tempdir().unwrap();
        let stub = StubSource::new();
        let sources = [
            RegulationSource::new("Annual_Filings.html", "https://adgm.test/page"),
            RegulationSource::new("Template.docx", "https://adgm.test/template.docx"),
        ];

        let written = download_missing(&stub, dir.path(), &sources).await.unwrap();
        assert_eq!(written, 2);

        let page = std::fs::read_to_string(dir.path().join("Annual_Filings.html")).unwrap();
        assert_eq!(page, "Annual accounts\nFile within nine months");
        assert_eq!(
            std::fs::read(dir.path().join("Template.docx")).unwrap(),
            b"PK-binary"
        );
    }

    #[tokio::test]
    async fn test_existing_files_are_not_downloaded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Annual_Filings.html"), "cached").unwrap();
        let stub = StubSource::new();
        let sources = [RegulationSource::new(
            "Annual_Filings.html",
            "https://adgm.test/page",
        )];

        let written = download_missing(&stub, dir.path(), &sources).await.unwrap();
        assert_eq!(written, 0);
        assert!(stub.requested.lock().unwrap().is_empty());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("Annual_Filings.html")).unwrap(),
            "cached"
        );
    }

    #[tokio::test]
    async fn test_failed_download_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let stub = StubSource::new();
        let sources = [
            RegulationSource::new("Gone.pdf", "https://adgm.test/gone"),
            RegulationSource::new("Annual_Filings.html", "https://adgm.test/page"),
        ];

        let written = download_missing(&stub, &dir.path().join("fresh"), &sources)
            .await
            .unwrap();
        assert_eq!(written, 1);
        assert!(!dir.path().join("fresh").join("Gone.pdf").exists());
        assert_eq!(stub.requested.lock().unwrap().len(), 2);
    }
}
