//! Metadata extractor trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ChunkAnnotation;

/// Trait for deriving a heading and one-sentence summary from a text excerpt
///
/// Implementations:
/// - `OllamaExtractor`: local Ollama server with JSON-constrained output
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    /// Annotate a text excerpt; fails with an extraction error on timeout,
    /// upstream unavailability, or malformed output
    async fn extract(&self, excerpt: &str) -> Result<ChunkAnnotation>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
