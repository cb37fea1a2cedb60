//! Provider abstractions for document loading, metadata extraction, and
//! vector storage
//!
//! The pipeline core only depends on the traits; concrete implementations
//! (lopdf, Ollama, Chroma) live alongside them and are injected at
//! construction time.

pub mod chroma;
pub mod loader;
pub mod metadata;
pub mod ollama;
pub mod pdf;
pub mod vector_store;

pub use loader::DocumentLoader;
pub use metadata::MetadataExtractor;
pub use vector_store::VectorStore;
