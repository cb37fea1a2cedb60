//! Document, page, and chunk types flowing through the pipeline

use serde::{Deserialize, Serialize};

/// Document-level metadata extracted by the loader
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

/// Text content of a single page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 0-based page index
    pub index: usize,
    /// Raw or cleaned text of the page
    pub content: String,
}

/// A loaded document: ordered pages plus document-level metadata
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Identifier derived from the source filename, stable across re-runs
    pub doc_id: String,
    pub pages: Vec<Page>,
    pub total_pages: usize,
    pub metadata: DocMetadata,
}

/// A document whose pages have passed through `TextCleaner`
#[derive(Debug, Clone)]
pub struct CleanedDocument {
    pub doc_id: String,
    pub pages: Vec<Page>,
    pub total_pages: usize,
    pub metadata: DocMetadata,
}

/// A contiguous text span extracted from one page
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub content: String,
    /// 0-based index of the page the chunk was extracted from
    pub source_page: usize,
}

impl Chunk {
    /// Length in Unicode scalar values
    pub fn char_length(&self) -> usize {
        self.content.chars().count()
    }
}

/// Maximal run of consecutive chunks sharing one source page
#[derive(Debug, Clone)]
pub struct ChunkGroup {
    pub source_page: usize,
    pub chunks: Vec<Chunk>,
}

/// Heading and summary returned by the metadata extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkAnnotation {
    /// The specific section or chapter title the text belongs to
    pub heading: String,
    /// A 1-sentence summary of the concepts discussed
    pub summary: String,
}

/// Structured metadata attached to a chunk at enrichment time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub heading: String,
    pub summary: String,
    /// 1-based page number. Chunks carry 0-based `source_page`; the stored
    /// value is shifted by one for downstream consumers.
    pub page: usize,
    pub title: String,
    pub subject: String,
    pub author: String,
}

/// A chunk plus its enrichment metadata and stable identifier, ready for
/// hand-off to the vector store
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedChunk {
    /// `<doc>_p<page>_c<index>`, unique within a document and stable across
    /// re-runs with identical input
    pub id: String,
    pub content: String,
    pub metadata: ChunkMetadata,
}
