//! Batch and per-file ingestion reports

use serde::Serialize;

/// Outcome of one file's trip through the pipeline
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub filename: String,
    /// SHA-256 over the raw page text, for traceability across re-runs
    pub content_hash: Option<String>,
    /// Chunks produced by the splitter before the length filter
    pub total_chunks: usize,
    /// Chunks that survived the length filter
    pub valid_chunks: usize,
    /// Mean character length of the valid chunks; `None` when there were none
    pub avg_chunk_len: Option<f64>,
    /// Page groups successfully handed to the vector store
    pub groups_stored: usize,
    /// Page groups the store rejected
    pub groups_failed: usize,
    /// Error that stopped this file, if any
    pub error: Option<String>,
}

impl FileReport {
    /// Report for a file that failed before producing chunks
    pub fn failed(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content_hash: None,
            total_chunks: 0,
            valid_chunks: 0,
            avg_chunk_len: None,
            groups_stored: 0,
            groups_failed: 0,
            error: Some(error.into()),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none() && self.groups_failed == 0
    }
}

/// Aggregate report for one ingestion batch
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub collection: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub finished_at: chrono::DateTime<chrono::Utc>,
    pub files: Vec<FileReport>,
}

impl IngestReport {
    /// Human-readable per-file summary for the CLI
    pub fn summary(&self) -> String {
        let mut out = format!("Ingestion report for collection '{}'\n", self.collection);
        for file in &self.files {
            match &file.error {
                Some(error) => out.push_str(&format!("  FAIL {} - {}\n", file.filename, error)),
                None => {
                    let avg = file
                        .avg_chunk_len
                        .map(|v| format!("{v:.1}"))
                        .unwrap_or_else(|| "n/a".to_string());
                    out.push_str(&format!(
                        "  OK   {} - {} chunks ({} valid, avg {} chars), {} groups stored, {} failed\n",
                        file.filename,
                        file.total_chunks,
                        file.valid_chunks,
                        avg,
                        file.groups_stored,
                        file.groups_failed,
                    ));
                }
            }
        }
        let ok = self.files.iter().filter(|f| f.error.is_none()).count();
        out.push_str(&format!("{}/{} files ingested", ok, self.files.len()));
        out
    }
}
