//! Document source reading local files and http(s) URLs

use async_trait::async_trait;
use corporate_agent_application::ports::document_source::{DocumentSource, FetchError};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub const USER_AGENT: &str = concat!("corporate-agent/", env!("CARGO_PKG_VERSION"));

/// Whether `location` should be fetched over HTTP
pub fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Shared HTTP client for the OpenAI API and downloads
pub fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().user_agent(USER_AGENT).build()
}

/// Reads documents from disk or over HTTP
pub struct DocumentFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl DocumentFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// GET `url` and return the body
    pub async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                location: url.to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| request_error(url, e))?;
        debug!(url, bytes = body.len(), "Fetched");
        Ok(body.to_vec())
    }
}

fn request_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else {
        FetchError::Request(e.to_string())
    }
}

#[async_trait]
impl DocumentSource for DocumentFetcher {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
        if is_url(location) {
            return self.get(location).await;
        }

        match tokio::fs::read(location).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FetchError::NotFound(location.to_string()))
            }
            Err(e) => Err(FetchError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://www.adgm.com/doc.pdf"));
        assert!(is_url("http://localhost:8000/a.docx"));
        assert!(!is_url("uploads/https.docx"));
        assert!(!is_url("/tmp/AoA.docx"));
    }

    #[tokio::test]
    async fn test_fetch_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AoA.docx");
        std::fs::write(&path, b"PK\x03\x04").unwrap();

        let fetcher = DocumentFetcher::new(reqwest::Client::new());
        let bytes = fetcher.fetch(path.to_str().unwrap()).await.unwrap();
        assert_eq!(bytes, b"PK\x03\x04");
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.docx");

        let fetcher = DocumentFetcher::new(reqwest::Client::new());
        let result = fetcher.fetch(path.to_str().unwrap()).await;
        assert!(matches!(result, Err(FetchError::NotFound(_))));
    }
}
