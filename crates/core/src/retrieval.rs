//! Retriever trait: the boundary to the knowledge/similarity subsystem.
//!
//! The agent core never chunks or indexes documents itself; it only asks
//! a retriever for the context text most relevant to a query.

use async_trait::async_trait;

use crate::error::RetrievalError;

#[async_trait]
pub trait Retriever: Send + Sync {
    /// A human-readable name for this retriever.
    fn name(&self) -> &str;

    /// Return the most relevant context text for `query`.
    ///
    /// An empty string means nothing relevant was found.
    async fn retrieve(&self, query: &str) -> Result<String, RetrievalError>;
}
