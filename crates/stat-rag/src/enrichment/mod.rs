//! LLM-backed chunk enrichment with per-chunk failure fallback

mod prompt;

pub use prompt::PromptBuilder;

use std::sync::Arc;

use crate::providers::MetadataExtractor;
use crate::types::{ChunkAnnotation, ChunkGroup, ChunkMetadata, DocMetadata, EnrichedChunk};

/// Heading substituted when the extractor fails for a chunk
pub const FALLBACK_HEADING: &str = "General Statistics";
/// Summary substituted when the extractor fails for a chunk
pub const FALLBACK_SUMMARY: &str = "Discussion on assumptions.";

/// Upper bound on the excerpt sent to the extractor, in characters
const EXCERPT_CHARS: usize = 1000;

pub struct ChunkEnricher {
    extractor: Arc<dyn MetadataExtractor>,
    /// Title recorded when the source document carries none
    fallback_title: String,
}

impl ChunkEnricher {
    pub fn new(extractor: Arc<dyn MetadataExtractor>, fallback_title: impl Into<String>) -> Self {
        Self {
            extractor,
            fallback_title: fallback_title.into(),
        }
    }

    /// Enrich every chunk of one page group, returning parallel sequences of
    /// ids and enriched chunks in input order.
    ///
    /// Extractor failures degrade to the fallback heading/summary; they never
    /// abort the group. The stored page number is 1-based while chunks carry
    /// 0-based `source_page`.
    pub async fn enrich(
        &self,
        doc_id: &str,
        doc_meta: &DocMetadata,
        group: &ChunkGroup,
    ) -> (Vec<String>, Vec<EnrichedChunk>) {
        let page = group.source_page + 1;
        tracing::info!(page, chunks = group.chunks.len(), "enriching page group");

        let mut ids = Vec::with_capacity(group.chunks.len());
        let mut enriched = Vec::with_capacity(group.chunks.len());
        for (index, chunk) in group.chunks.iter().enumerate() {
            let annotation = match self.extractor.extract(excerpt(&chunk.content)).await {
                Ok(annotation) => annotation,
                Err(error) => {
                    tracing::warn!(
                        page,
                        chunk = index,
                        %error,
                        "metadata extraction failed, using fallback"
                    );
                    ChunkAnnotation {
                        heading: FALLBACK_HEADING.to_string(),
                        summary: FALLBACK_SUMMARY.to_string(),
                    }
                }
            };

            let metadata = ChunkMetadata {
                heading: annotation.heading,
                summary: annotation.summary,
                page,
                title: doc_meta
                    .title
                    .clone()
                    .unwrap_or_else(|| self.fallback_title.clone()),
                subject: doc_meta.subject.clone().unwrap_or_default(),
                author: doc_meta
                    .author
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
            };

            let id = format!("{doc_id}_p{page}_c{index}");
            ids.push(id.clone());
            enriched.push(EnrichedChunk {
                id,
                content: chunk.content.clone(),
                metadata,
            });

            if index % 10 == 0 {
                tracing::info!("processed {}/{} chunks", index, group.chunks.len());
            }
        }
        (ids, enriched)
    }
}

/// First `EXCERPT_CHARS` characters of a chunk, respecting char boundaries
fn excerpt(content: &str) -> &str {
    match content.char_indices().nth(EXCERPT_CHARS) {
        Some((byte, _)) => &content[..byte],
        None => content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::types::Chunk;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FailingExtractor;

    #[async_trait]
    impl MetadataExtractor for FailingExtractor {
        async fn extract(&self, _excerpt: &str) -> Result<ChunkAnnotation> {
            Err(Error::extraction("model unavailable"))
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(false)
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    /// Records excerpt lengths and answers with a fixed annotation
    struct RecordingExtractor {
        excerpt_chars: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl MetadataExtractor for RecordingExtractor {
        async fn extract(&self, excerpt: &str) -> Result<ChunkAnnotation> {
            self.excerpt_chars
                .lock()
                .unwrap()
                .push(excerpt.chars().count());
            Ok(ChunkAnnotation {
                heading: "Regression".to_string(),
                summary: "Covers residual analysis.".to_string(),
            })
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn group(source_page: usize, contents: &[&str]) -> ChunkGroup {
        ChunkGroup {
            source_page,
            chunks: contents
                .iter()
                .map(|c| Chunk {
                    content: c.to_string(),
                    source_page,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_failing_extractor_falls_back_without_aborting() {
        let enricher = ChunkEnricher::new(Arc::new(FailingExtractor), "Fallback Title");
        let group = group(2, &["first chunk", "second chunk", "third chunk"]);

        let (ids, enriched) = enricher
            .enrich("stats_book", &DocMetadata::default(), &group)
            .await;

        assert_eq!(enriched.len(), 3);
        for chunk in &enriched {
            assert_eq!(chunk.metadata.heading, FALLBACK_HEADING);
            assert_eq!(chunk.metadata.summary, FALLBACK_SUMMARY);
            assert_eq!(chunk.metadata.page, 3);
            assert_eq!(chunk.metadata.title, "Fallback Title");
            assert_eq!(chunk.metadata.author, "Unknown");
            assert_eq!(chunk.metadata.subject, "");
        }
        assert_eq!(
            ids,
            vec!["stats_book_p3_c0", "stats_book_p3_c1", "stats_book_p3_c2"]
        );
    }

    #[tokio::test]
    async fn test_excerpt_capped_at_1000_chars() {
        let extractor = Arc::new(RecordingExtractor {
            excerpt_chars: Mutex::new(Vec::new()),
        });
        let enricher = ChunkEnricher::new(extractor.clone(), "Title");
        let long_content = "x".repeat(1500);
        let group = group(0, &[&long_content, "short"]);

        let (_, enriched) = enricher
            .enrich("doc", &DocMetadata::default(), &group)
            .await;

        let lengths = extractor.excerpt_chars.lock().unwrap().clone();
        assert_eq!(lengths, vec![1000, 5]);
        assert_eq!(enriched[0].metadata.heading, "Regression");
        // Stored content is the full chunk, not the excerpt.
        assert_eq!(enriched[0].content.chars().count(), 1500);
    }

    #[tokio::test]
    async fn test_document_metadata_preferred_over_fallbacks() {
        let extractor = Arc::new(RecordingExtractor {
            excerpt_chars: Mutex::new(Vec::new()),
        });
        let enricher = ChunkEnricher::new(extractor, "Fallback Title");
        let meta = DocMetadata {
            title: Some("Real Title".to_string()),
            author: Some("J. Stats".to_string()),
            subject: Some("Statistics".to_string()),
        };
        let group = group(0, &["content"]);

        let (_, enriched) = enricher.enrich("doc", &meta, &group).await;
        assert_eq!(enriched[0].metadata.title, "Real Title");
        assert_eq!(enriched[0].metadata.author, "J. Stats");
        assert_eq!(enriched[0].metadata.subject, "Statistics");
        assert_eq!(enriched[0].id, "doc_p1_c0");
    }
}
