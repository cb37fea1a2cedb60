//! Core types for the ingestion pipeline

pub mod document;
pub mod report;

pub use document::{
    Chunk, ChunkAnnotation, ChunkGroup, ChunkMetadata, CleanedDocument, DocMetadata,
    EnrichedChunk, Page, RawDocument,
};
pub use report::{FileReport, IngestReport};
