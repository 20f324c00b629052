// Embedding payload sources and the session-wide single-flight cache.
//
// A source fetches the raw payload text from wherever it lives. The cache
// tries its sources in order, parses the first payload it gets, and keeps
// the resulting table for the life of the `AnalysisContext`. Concurrent
// callers await the same in-flight load rather than starting another.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::embeddings::EmbeddingTable;
use crate::error::AnalysisError;

/// Somewhere an embedding payload can be fetched from.
#[async_trait]
pub trait EmbeddingSource: Send + Sync {
    /// Fetch the raw payload text.
    async fn fetch(&self) -> Result<String, AnalysisError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Payload on the local filesystem.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EmbeddingSource for FileSource {
    async fn fetch(&self) -> Result<String, AnalysisError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AnalysisError::EmbeddingLoadFailure(format!("{}: {e}", self.path.display()))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Payload served over HTTP(S).
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl EmbeddingSource for HttpSource {
    async fn fetch(&self) -> Result<String, AnalysisError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AnalysisError::EmbeddingLoadFailure(format!("{}: {e}", self.url)))?;

        if !response.status().is_success() {
            return Err(AnalysisError::EmbeddingLoadFailure(format!(
                "{} returned {}",
                self.url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AnalysisError::EmbeddingLoadFailure(format!("{}: {e}", self.url)))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Build a source from a location string: `http(s)://` URLs become
/// `HttpSource`, anything else a `FileSource`.
pub fn source_for(location: &str) -> Box<dyn EmbeddingSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Loads the embedding table at most once per session.
pub struct EmbeddingCache {
    sources: Vec<Box<dyn EmbeddingSource>>,
    table: OnceCell<Arc<EmbeddingTable>>,
}

impl EmbeddingCache {
    pub fn new(sources: Vec<Box<dyn EmbeddingSource>>) -> Self {
        Self {
            sources,
            table: OnceCell::new(),
        }
    }

    /// A cache that is already populated, for callers that hold a table.
    pub fn preloaded(table: EmbeddingTable) -> Self {
        Self {
            sources: Vec::new(),
            table: OnceCell::new_with(Some(Arc::new(table))),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.table.initialized()
    }

    /// The table, loading it on first use. Never fails: when every source
    /// fails the cached table is empty.
    pub async fn get(&self) -> Arc<EmbeddingTable> {
        self.table
            .get_or_init(|| async { Arc::new(self.load().await) })
            .await
            .clone()
    }

    async fn load(&self) -> EmbeddingTable {
        for source in &self.sources {
            match source.fetch().await {
                Ok(payload) => {
                    let table = EmbeddingTable::parse_payload(&payload);
                    info!(
                        source = %source.describe(),
                        words = table.len(),
                        "Loaded word embeddings"
                    );
                    return table;
                }
                Err(e) => {
                    warn!(error = %e, "Embedding source unavailable, trying next");
                }
            }
        }
        warn!(
            sources = self.sources.len(),
            "No embedding source available, gap finder will use fallback"
        );
        EmbeddingTable::default()
    }
}
