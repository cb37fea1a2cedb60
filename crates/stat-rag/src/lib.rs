//! stat-rag: PDF ingestion pipeline for a RAG knowledge base
//!
//! Takes a directory of PDF documents, cleans each page (encoding
//! normalization, header/footer stripping, whitespace collapsing), splits the
//! text into bounded-size overlapping chunks that never cross a page boundary,
//! enriches each chunk with LLM-derived metadata (heading, summary), and
//! upserts the result into a vector store collection one page group at a time.

pub mod config;
pub mod enrichment;
pub mod error;
pub mod ingestion;
pub mod providers;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use ingestion::{ChunkSplitter, Ingestor, PageGrouper, TextCleaner};
pub use types::{Chunk, ChunkGroup, EnrichedChunk, IngestReport, RawDocument};
