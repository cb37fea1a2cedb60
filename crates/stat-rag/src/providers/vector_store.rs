//! Vector store trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::EnrichedChunk;

/// Trait for persisting enriched chunks into a named collection
///
/// `store` is expected to upsert, so re-running ingestion with identical ids
/// and collection is safe.
///
/// Implementations:
/// - `ChromaStore`: Chroma REST API
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Persist one batch of chunks under the given ids
    async fn store(
        &self,
        collection: &str,
        ids: &[String],
        chunks: &[EnrichedChunk],
    ) -> Result<()>;

    /// Check if the provider is healthy
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
