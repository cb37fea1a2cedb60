//! Document loader trait

use std::path::Path;

use crate::error::Result;
use crate::types::RawDocument;

/// Trait for loading a source file into an ordered sequence of pages
///
/// Implementations:
/// - `PdfLoader`: per-page text extraction via lopdf
pub trait DocumentLoader: Send + Sync {
    /// Load a file into pages plus document-level metadata; fails with a load
    /// error on unreadable or corrupt files
    fn load(&self, path: &Path) -> Result<RawDocument>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
