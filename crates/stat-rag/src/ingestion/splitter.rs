//! Recursive character splitting with overlap and page attribution
//!
//! Text is split by the coarsest separator that appears in it (paragraph
//! break, then line break, space, single characters) and the pieces are merged
//! back into chunks of at most `chunk_size` characters, carrying
//! `chunk_overlap` characters over between adjacent chunks. Pages are split
//! independently so a chunk never spans a page boundary.

use std::collections::VecDeque;

use crate::config::ChunkingConfig;
use crate::error::{Error, Result};
use crate::types::{Chunk, CleanedDocument};

/// Separator ladder, coarsest first. The empty string splits into characters
/// and always matches, so every piece can be reduced below the chunk size.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Splitter output: filtered chunks plus the pre-filter count for reporting
#[derive(Debug)]
pub struct SplitReport {
    pub chunks: Vec<Chunk>,
    /// Chunks produced before the minimum-length filter
    pub total_produced: usize,
}

pub struct ChunkSplitter {
    config: ChunkingConfig,
}

impl ChunkSplitter {
    /// Create a splitter; rejects configurations where the overlap would
    /// swallow the whole chunk
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        validate(config.chunk_size, config.chunk_overlap)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Update chunk size and/or overlap. `None` leaves a field unchanged; with
    /// both `None` the call is a no-op. An invalid combination is rejected and
    /// the previous configuration stays in effect.
    pub fn update(&mut self, chunk_size: Option<usize>, chunk_overlap: Option<usize>) -> Result<()> {
        if chunk_size.is_none() && chunk_overlap.is_none() {
            tracing::debug!("splitter update: nothing to change");
            return Ok(());
        }
        let new_size = chunk_size.unwrap_or(self.config.chunk_size);
        let new_overlap = chunk_overlap.unwrap_or(self.config.chunk_overlap);
        validate(new_size, new_overlap)?;
        self.config.chunk_size = new_size;
        self.config.chunk_overlap = new_overlap;
        tracing::info!(
            chunk_size = new_size,
            chunk_overlap = new_overlap,
            "splitter reconfigured"
        );
        Ok(())
    }

    /// Split every page independently, concatenating results in page order.
    /// Chunks at or below `min_chunk_chars` are discarded as noise but still
    /// counted in `total_produced`.
    pub fn split(&self, document: &CleanedDocument) -> SplitReport {
        let mut chunks = Vec::new();
        let mut total_produced = 0;
        for page in &document.pages {
            for content in self.split_text(&page.content) {
                total_produced += 1;
                if char_len(&content) > self.config.min_chunk_chars {
                    chunks.push(Chunk {
                        content,
                        source_page: page.index,
                    });
                }
            }
        }
        SplitReport {
            chunks,
            total_produced,
        }
    }

    fn split_text(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        self.split_recursive(text, &SEPARATORS)
    }

    fn split_recursive(&self, text: &str, separators: &[&str]) -> Vec<String> {
        // First separator actually present in the text; "" always matches.
        let mut separator = "";
        let mut remaining: &[&str] = &[];
        for (i, sep) in separators.iter().enumerate() {
            if sep.is_empty() || text.contains(sep) {
                separator = sep;
                remaining = &separators[i + 1..];
                break;
            }
        }

        let pieces: Vec<String> = if separator.is_empty() {
            text.chars().map(String::from).collect()
        } else {
            text.split(separator).map(str::to_string).collect()
        };

        let mut chunks = Vec::new();
        let mut pending: Vec<String> = Vec::new();
        for piece in pieces {
            if char_len(&piece) < self.config.chunk_size {
                pending.push(piece);
                continue;
            }
            if !pending.is_empty() {
                chunks.extend(self.merge_pieces(&pending, separator));
                pending.clear();
            }
            if remaining.is_empty() {
                // No finer separator left; keep the oversized piece whole.
                chunks.push(piece);
            } else {
                chunks.extend(self.split_recursive(&piece, remaining));
            }
        }
        if !pending.is_empty() {
            chunks.extend(self.merge_pieces(&pending, separator));
        }
        chunks
    }

    /// Merge small pieces into chunks of at most `chunk_size` characters,
    /// retaining a trailing window of at most `chunk_overlap` characters as
    /// the start of the next chunk.
    fn merge_pieces(&self, pieces: &[String], separator: &str) -> Vec<String> {
        let sep_len = char_len(separator);
        let mut merged = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let piece_len = char_len(piece);
            let join_len = if window.is_empty() { 0 } else { sep_len };
            if total + piece_len + join_len > self.config.chunk_size && !window.is_empty() {
                if let Some(chunk) = join_window(&window, separator) {
                    merged.push(chunk);
                }
                while total > self.config.chunk_overlap
                    || (total + piece_len + if window.is_empty() { 0 } else { sep_len }
                        > self.config.chunk_size
                        && total > 0)
                {
                    let Some(front) = window.pop_front() else {
                        break;
                    };
                    total -= char_len(front) + if window.is_empty() { 0 } else { sep_len };
                }
            }
            window.push_back(piece);
            total += piece_len + if window.len() > 1 { sep_len } else { 0 };
        }

        if let Some(chunk) = join_window(&window, separator) {
            merged.push(chunk);
        }
        merged
    }
}

fn validate(chunk_size: usize, chunk_overlap: usize) -> Result<()> {
    if chunk_size <= chunk_overlap {
        return Err(Error::SplitterConfig {
            chunk_size,
            chunk_overlap,
        });
    }
    Ok(())
}

fn join_window(window: &VecDeque<&str>, separator: &str) -> Option<String> {
    let joined = window.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DocMetadata, Page};

    fn config(chunk_size: usize, chunk_overlap: usize, min_chunk_chars: usize) -> ChunkingConfig {
        ChunkingConfig {
            chunk_size,
            chunk_overlap,
            min_chunk_chars,
        }
    }

    fn document(pages: Vec<&str>) -> CleanedDocument {
        let total_pages = pages.len();
        CleanedDocument {
            doc_id: "test".to_string(),
            pages: pages
                .into_iter()
                .enumerate()
                .map(|(index, content)| Page {
                    index,
                    content: content.to_string(),
                })
                .collect(),
            total_pages,
            metadata: DocMetadata::default(),
        }
    }

    #[test]
    fn test_chunks_stay_within_size() {
        let words: Vec<String> = (0..200).map(|i| format!("word{i}")).collect();
        let text = words.join(" ");
        let splitter = ChunkSplitter::new(config(100, 20, 0)).unwrap();

        let report = splitter.split(&document(vec![&text]));
        assert!(!report.chunks.is_empty());
        for chunk in &report.chunks {
            assert!(
                chunk.char_length() <= 100,
                "chunk of {} chars exceeds size",
                chunk.char_length()
            );
        }
    }

    #[test]
    fn test_adjacent_chunks_overlap() {
        let words: Vec<String> = (0..100).map(|i| format!("w{i:03}")).collect();
        let text = words.join(" ");
        let splitter = ChunkSplitter::new(config(60, 15, 0)).unwrap();

        let report = splitter.split(&document(vec![&text]));
        assert!(report.chunks.len() > 2);
        for pair in report.chunks.windows(2) {
            let first_word = pair[1].content.split(' ').next().unwrap();
            assert!(
                pair[0].content.contains(first_word),
                "chunk '{}' does not carry overlap into '{}'",
                pair[0].content,
                pair[1].content
            );
        }
    }

    #[test]
    fn test_paragraph_separator_preferred() {
        let text = "First short paragraph.\n\nSecond short paragraph.";
        let splitter = ChunkSplitter::new(config(30, 5, 0)).unwrap();

        let report = splitter.split(&document(vec![text]));
        assert_eq!(report.chunks.len(), 2);
        assert_eq!(report.chunks[0].content, "First short paragraph.");
        assert_eq!(report.chunks[1].content, "Second short paragraph.");
    }

    #[test]
    fn test_unbroken_text_falls_back_to_characters() {
        let text = "x".repeat(250);
        let splitter = ChunkSplitter::new(config(100, 10, 0)).unwrap();

        let report = splitter.split(&document(vec![&text]));
        assert!(report.chunks.len() >= 3);
        for chunk in &report.chunks {
            assert!(chunk.char_length() <= 100);
        }
    }

    #[test]
    fn test_chunks_never_span_pages() {
        let page_a = "alpha ".repeat(40);
        let page_b = "omega ".repeat(40);
        let splitter = ChunkSplitter::new(config(80, 10, 0)).unwrap();

        let report = splitter.split(&document(vec![&page_a, &page_b]));
        for chunk in &report.chunks {
            match chunk.source_page {
                0 => assert!(!chunk.content.contains("omega")),
                1 => assert!(!chunk.content.contains("alpha")),
                other => panic!("unexpected page {other}"),
            }
        }
        // Page order preserved.
        let first_page_b = report
            .chunks
            .iter()
            .position(|c| c.source_page == 1)
            .unwrap();
        assert!(report.chunks[..first_page_b]
            .iter()
            .all(|c| c.source_page == 0));
    }

    #[test]
    fn test_short_chunks_filtered_but_counted() {
        let text = "tiny.\n\nThis paragraph is comfortably longer than the fifty character noise floor.";
        let splitter = ChunkSplitter::new(config(80, 20, 50)).unwrap();

        let report = splitter.split(&document(vec![text]));
        assert_eq!(report.total_produced, 2);
        assert_eq!(report.chunks.len(), 1);
        assert!(report.chunks[0].content.starts_with("This paragraph"));
    }

    #[test]
    fn test_invalid_construction_rejected() {
        assert!(matches!(
            ChunkSplitter::new(config(10, 20, 0)),
            Err(Error::SplitterConfig { chunk_size: 10, chunk_overlap: 20 })
        ));
    }

    #[test]
    fn test_invalid_update_keeps_previous_config() {
        let mut splitter = ChunkSplitter::new(config(100, 20, 50)).unwrap();
        let err = splitter.update(Some(10), Some(20)).unwrap_err();
        assert!(matches!(err, Error::SplitterConfig { .. }));
        assert_eq!(splitter.config().chunk_size, 100);
        assert_eq!(splitter.config().chunk_overlap, 20);
    }

    #[test]
    fn test_update_with_nothing_to_change_is_noop() {
        let mut splitter = ChunkSplitter::new(config(100, 20, 50)).unwrap();
        splitter.update(None, None).unwrap();
        assert_eq!(splitter.config().chunk_size, 100);
        assert_eq!(splitter.config().chunk_overlap, 20);
    }

    #[test]
    fn test_partial_update_commits() {
        let mut splitter = ChunkSplitter::new(config(100, 20, 50)).unwrap();
        splitter.update(Some(200), None).unwrap();
        assert_eq!(splitter.config().chunk_size, 200);
        assert_eq!(splitter.config().chunk_overlap, 20);
    }
}
