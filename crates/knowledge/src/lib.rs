//! Knowledge base retrieval for Switchyard.
//!
//! Loads a plain-text corpus, splits it into overlapping chunks, indexes
//! each chunk as a term-frequency vector, and answers `retrieve(query)`
//! with the most similar chunks joined by newlines.

pub mod index;
pub mod splitter;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use switchyard_core::error::RetrievalError;
use switchyard_core::retrieval::Retriever;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

pub use index::ChunkIndex;
pub use splitter::TextSplitter;

/// An in-memory, read-only knowledge base.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    index: ChunkIndex,
    top_k: usize,
}

impl KnowledgeBase {
    /// Build a knowledge base from raw text.
    pub fn from_text(text: &str, splitter: &TextSplitter, top_k: usize) -> Self {
        let chunks = splitter.split(text);
        info!(chunks = chunks.len(), "Knowledge base indexed");
        Self {
            index: ChunkIndex::build(chunks),
            top_k: top_k.max(1),
        }
    }

    /// Load and index a text file.
    pub fn load(path: &Path, splitter: &TextSplitter, top_k: usize) -> Result<Self, RetrievalError> {
        let text = std::fs::read_to_string(path).map_err(|e| RetrievalError::Unavailable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_text(&text, splitter, top_k))
    }

    pub fn chunk_count(&self) -> usize {
        self.index.len()
    }

    /// The most relevant chunks for `query`, joined by newlines.
    pub fn context_for(&self, query: &str) -> String {
        let hits = self.index.search(query, self.top_k);
        debug!(hits = hits.len(), "Knowledge base searched");
        hits.iter().map(|h| h.text).collect::<Vec<_>>().join("\n")
    }
}

#[async_trait]
impl Retriever for KnowledgeBase {
    fn name(&self) -> &str {
        "knowledge_base"
    }

    async fn retrieve(&self, query: &str) -> Result<String, RetrievalError> {
        Ok(self.context_for(query))
    }
}

/// A knowledge base read from disk on its first retrieval.
///
/// Only queries that retrieve touch the file, so a missing corpus fails
/// research queries and leaves every other path usable. A failed load is
/// not cached; the next retrieval tries again.
#[derive(Debug)]
pub struct KnowledgeFile {
    path: PathBuf,
    splitter: TextSplitter,
    top_k: usize,
    loaded: OnceCell<KnowledgeBase>,
}

impl KnowledgeFile {
    pub fn new(path: impl Into<PathBuf>, splitter: TextSplitter, top_k: usize) -> Self {
        Self {
            path: path.into(),
            splitter,
            top_k,
            loaded: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The indexed knowledge base, loading it on first use.
    pub async fn get(&self) -> Result<&KnowledgeBase, RetrievalError> {
        self.loaded
            .get_or_try_init(|| async {
                KnowledgeBase::load(&self.path, &self.splitter, self.top_k).inspect_err(|e| {
                    warn!(path = %self.path.display(), error = %e, "Knowledge base load failed");
                })
            })
            .await
    }
}

#[async_trait]
impl Retriever for KnowledgeFile {
    fn name(&self) -> &str {
        "knowledge_base"
    }

    async fn retrieve(&self, query: &str) -> Result<String, RetrievalError> {
        Ok(self.get().await?.context_for(query))
    }
}
