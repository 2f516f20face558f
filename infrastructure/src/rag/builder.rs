//! Building the regulation index from downloaded sources

use super::Embedder;
use super::error::IndexError;
use super::index::{IndexEntry, VectorIndex};
use super::loader::load_directory;
use super::sources::{RegulationSource, download_missing};
use super::splitter::TextSplitter;
use corporate_agent_application::ports::document_source::DocumentSource;
use corporate_agent_application::ports::retriever::RetrievalError;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Loads the persisted index, or downloads, splits and embeds the sources
pub struct IndexBuilder {
    embedder: Arc<dyn Embedder>,
    fetcher: Arc<dyn DocumentSource>,
    /// Embedding model name recorded in the index
    model: String,
    sources_dir: PathBuf,
    index_path: PathBuf,
    sources: Vec<RegulationSource>,
    splitter: TextSplitter,
}

impl IndexBuilder {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        fetcher: Arc<dyn DocumentSource>,
        model: impl Into<String>,
        sources_dir: impl Into<PathBuf>,
        index_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            embedder,
            fetcher,
            model: model.into(),
            sources_dir: sources_dir.into(),
            index_path: index_path.into(),
            sources: Vec::new(),
            splitter: TextSplitter::default(),
        }
    }

    pub fn with_sources(mut self, sources: Vec<RegulationSource>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_splitter(mut self, splitter: TextSplitter) -> Self {
        self.splitter = splitter;
        self
    }

    /// Reuse the index on disk when it was built with the same model
    pub async fn load_or_build(&self) -> Result<VectorIndex, IndexError> {
        match VectorIndex::open(&self.index_path, &self.model).await {
            Ok(Some(index)) => {
                info!(
                    "Loaded vector index {} ({} chunks, model '{}')",
                    self.index_path.display(),
                    index.len().await?,
                    self.model
                );
                return Ok(index);
            }
            Ok(None) => info!(
                "No '{}' index in {}, building one",
                self.model,
                self.index_path.display()
            ),
            Err(e) => warn!("{}; rebuilding", e),
        }
        self.build().await
    }

    /// Download missing sources and rebuild the index from scratch
    pub async fn build(&self) -> Result<VectorIndex, IndexError> {
        info!("Building vector index from {}", self.sources_dir.display());

        let downloaded = download_missing(self.fetcher.as_ref(), &self.sources_dir, &self.sources)
            .await
            .map_err(|e| IndexError::io(&self.sources_dir, e))?;
        if downloaded > 0 {
            info!("Downloaded {} regulation document(s)", downloaded);
        }

        let dir = self.sources_dir.clone();
        let documents = tokio::task::spawn_blocking(move || load_directory(&dir))
            .await
            .map_err(|e| IndexError::Task(e.to_string()))??;

        let mut chunks: Vec<(String, String)> = Vec::new();
        for document in &documents {
            for chunk in self.splitter.split(&document.text) {
                chunks.push((document.source.clone(), chunk));
            }
        }
        if chunks.is_empty() {
            return Err(IndexError::NoDocuments(self.sources_dir.clone()));
        }

        let texts: Vec<String> = chunks.iter().map(|(_, text)| text.clone()).collect();
        let vectors = self.embedder.embed(&texts).await?;
        if vectors.len() != texts.len() {
            return Err(RetrievalError::EmbeddingFailed(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                vectors.len()
            ))
            .into());
        }

        let entries: Vec<IndexEntry> = chunks
            .into_iter()
            .zip(vectors)
            .map(|((source, text), vector)| IndexEntry {
                text,
                source,
                vector,
            })
            .collect();

        let index = VectorIndex::create(&self.index_path, &self.model, &entries).await?;
        info!(
            "Vector index saved to {} ({} chunks from {} documents)",
            self.index_path.display(),
            entries.len(),
            documents.len()
        );
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::retriever::tests::KeywordEmbedder;
    use async_trait::async_trait;
    use corporate_agent_application::ports::document_source::FetchError;
    use std::sync::atomic::Ordering;

    struct OfflineSource;

    #[async_trait]
    impl DocumentSource for OfflineSource {
        async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
            Err(FetchError::Request(format!("offline: {location}")))
        }
    }

    fn builder(dir: &std::path::Path, embedder: Arc<KeywordEmbedder>, model: &str) -> IndexBuilder {
        IndexBuilder::new(
            embedder,
            Arc::new(OfflineSource),
            model,
            dir.join("sources"),
            dir.join("index"),
        )
        .with_splitter(TextSplitter::new(60, 10))
        .with_sources(vec![RegulationSource::new(
            "Unreachable.pdf",
            "https://adgm.test/unreachable.pdf",
        )])
    }

    fn write_sources(dir: &std::path::Path) {
        let sources = dir.join("sources");
        std::fs::create_dir_all(&sources).unwrap();
        std::fs::write(
            sources.join("Courts.txt"),
            "Disputes are heard by the ADGM Court.\n\nAppeals go to the ADGM Court of Appeal.",
        )
        .unwrap();
        std::fs::write(
            sources.join("Annual_Filings.html"),
            "Annual accounts are filed within nine months of year end.",
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_build_embeds_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        write_sources(dir.path());
        let embedder = Arc::new(KeywordEmbedder::new());

        let index = builder(dir.path(), embedder.clone(), "keywords")
            .build()
            .await
            .unwrap();

        assert_eq!(index.model(), "keywords");
        assert!(index.len().await.unwrap() >= 3);
        assert!(dir.path().join("index").exists());
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);

        let hits = index
            .search(&KeywordEmbedder::vector("annual accounts"), 1)
            .await
            .unwrap();
        assert_eq!(hits[0].source, "Annual_Filings.html");
        assert!(hits[0].text.chars().count() <= 60);
    }

    #[tokio::test]
    async fn test_load_or_build_reuses_saved_index() {
        let dir = tempfile::tempdir().unwrap();
        write_sources(dir.path());
        let embedder = Arc::new(KeywordEmbedder::new());
        let builder = builder(dir.path(), embedder.clone(), "keywords");

        let built = builder.load_or_build().await.unwrap();
        let loaded = builder.load_or_build().await.unwrap();

        assert_eq!(built.len().await.unwrap(), loaded.len().await.unwrap());
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_model_change_triggers_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        write_sources(dir.path());
        let embedder = Arc::new(KeywordEmbedder::new());

        builder(dir.path(), embedder.clone(), "old-model")
            .load_or_build()
            .await
            .unwrap();
        let index = builder(dir.path(), embedder.clone(), "new-model")
            .load_or_build()
            .await
            .unwrap();

        assert_eq!(index.model(), "new-model");
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_no_sources_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = builder(dir.path(), Arc::new(KeywordEmbedder::new()), "keywords")
            .build()
            .await;
        assert!(matches!(result, Err(IndexError::NoDocuments(_))));
        assert!(!dir.path().join("index").exists());
    }
}
