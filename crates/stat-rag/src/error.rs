//! Error types for the ingestion pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors
///
/// Only `Config` is fatal to a whole run. `Load` is recorded per file,
/// `Extraction` degrades to fallback metadata per chunk, `Storage` is recorded
/// per page group, and `SplitterConfig` rejects the offending update while the
/// previous configuration stays in effect.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (missing directory, missing credentials)
    #[error("Configuration error: {0}")]
    Config(String),

    /// File loading error
    #[error("Failed to load '{filename}': {message}")]
    Load { filename: String, message: String },

    /// Metadata extraction error
    #[error("Metadata extraction failed: {0}")]
    Extraction(String),

    /// Vector store error
    #[error("Vector store error: {0}")]
    Storage(String),

    /// Rejected splitter configuration update
    #[error("Invalid splitter config: chunk_size ({chunk_size}) must be greater than chunk_overlap ({chunk_overlap})")]
    SplitterConfig {
        chunk_size: usize,
        chunk_overlap: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a file load error
    pub fn load(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Load {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create a metadata extraction error
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction(message.into())
    }

    /// Create a vector store error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}
