//! Ingestion orchestration: drives a directory batch through cleaning,
//! splitting, grouping, enrichment, and storage

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::enrichment::ChunkEnricher;
use crate::error::{Error, Result};
use crate::ingestion::{ChunkSplitter, PageGrouper, TextCleaner};
use crate::providers::{DocumentLoader, VectorStore};
use crate::types::{Chunk, FileReport, IngestReport, RawDocument};

pub struct Ingestor {
    source_dir: PathBuf,
    loader: Arc<dyn DocumentLoader>,
    cleaner: TextCleaner,
    splitter: ChunkSplitter,
    enricher: ChunkEnricher,
    store: Arc<dyn VectorStore>,
}

impl Ingestor {
    /// Assemble the pipeline. Fails with a configuration error when the
    /// source directory does not exist.
    pub fn new(
        source_dir: impl AsRef<Path>,
        loader: Arc<dyn DocumentLoader>,
        cleaner: TextCleaner,
        splitter: ChunkSplitter,
        enricher: ChunkEnricher,
        store: Arc<dyn VectorStore>,
    ) -> Result<Self> {
        let source_dir = source_dir.as_ref().to_path_buf();
        if !source_dir.is_dir() {
            return Err(Error::config(format!(
                "source directory does not exist: {}",
                source_dir.display()
            )));
        }
        Ok(Self {
            source_dir,
            loader,
            cleaner,
            splitter,
            enricher,
            store,
        })
    }

    /// Access the splitter for runtime reconfiguration
    pub fn splitter_mut(&mut self) -> &mut ChunkSplitter {
        &mut self.splitter
    }

    /// Eligible source files: flat listing, hidden names excluded, sorted for
    /// stable runs
    fn eligible_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.source_dir).min_depth(1).max_depth(1) {
            let entry =
                entry.map_err(|e| Error::config(format!("cannot read source directory: {e}")))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            files.push(entry.into_path());
        }
        files.sort();
        Ok(files)
    }

    /// Process every eligible file into the given collection. One file's
    /// failure is recorded in its report entry and never aborts the batch.
    pub async fn ingest_all(&self, collection: &str) -> Result<IngestReport> {
        let files = self.eligible_files()?;
        let started_at = chrono::Utc::now();
        tracing::info!(
            count = files.len(),
            dir = %self.source_dir.display(),
            collection,
            "starting ingestion batch"
        );

        let mut reports = Vec::with_capacity(files.len());
        for path in files {
            let filename = display_name(&path);
            tracing::info!(file = %filename, "processing");
            match self.ingest_file(&path, collection).await {
                Ok(report) => reports.push(report),
                Err(error) => {
                    tracing::error!(file = %filename, %error, "file failed");
                    reports.push(FileReport::failed(filename, error.to_string()));
                }
            }
        }

        Ok(IngestReport {
            collection: collection.to_string(),
            started_at,
            finished_at: chrono::Utc::now(),
            files: reports,
        })
    }

    /// One file: load -> clean -> split -> group -> enrich -> store.
    ///
    /// Groups are enriched and stored as soon as they close, so at most one
    /// page's chunks are buffered for enrichment at a time. A storage failure
    /// loses that group's persistence, is counted, and the file continues.
    async fn ingest_file(&self, path: &Path, collection: &str) -> Result<FileReport> {
        let filename = display_name(path);
        let raw = self.loader.load(path)?;
        let content_hash = hash_pages(&raw);

        let cleaned = self.cleaner.clean(raw);
        let split = self.splitter.split(&cleaned);
        let valid_chunks = split.chunks.len();
        let avg_chunk_len = average_chunk_len(&split.chunks);
        tracing::info!(
            total = split.total_produced,
            valid = valid_chunks,
            "chunking finished"
        );

        let mut groups_stored = 0;
        let mut groups_failed = 0;
        for group in PageGrouper::groups(split.chunks) {
            let (ids, enriched) = self
                .enricher
                .enrich(&cleaned.doc_id, &cleaned.metadata, &group)
                .await;
            match self.store.store(collection, &ids, &enriched).await {
                Ok(()) => groups_stored += 1,
                Err(error) => {
                    groups_failed += 1;
                    tracing::warn!(
                        page = group.source_page + 1,
                        %error,
                        "failed to store page group"
                    );
                }
            }
        }

        Ok(FileReport {
            filename,
            content_hash: Some(content_hash),
            total_chunks: split.total_produced,
            valid_chunks,
            avg_chunk_len,
            groups_stored,
            groups_failed,
            error: None,
        })
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// SHA-256 over the raw page text
fn hash_pages(document: &RawDocument) -> String {
    let mut hasher = Sha256::new();
    for page in &document.pages {
        hasher.update(page.content.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Mean character length of the chunks; `None` when there are none
fn average_chunk_len(chunks: &[Chunk]) -> Option<f64> {
    if chunks.is_empty() {
        return None;
    }
    let total: usize = chunks.iter().map(Chunk::char_length).sum();
    Some(total as f64 / chunks.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_chunk_len_empty_is_none() {
        assert_eq!(average_chunk_len(&[]), None);
    }

    #[test]
    fn test_average_chunk_len() {
        let chunks = vec![
            Chunk {
                content: "abcd".to_string(),
                source_page: 0,
            },
            Chunk {
                content: "ab".to_string(),
                source_page: 0,
            },
        ];
        assert_eq!(average_chunk_len(&chunks), Some(3.0));
    }
}
