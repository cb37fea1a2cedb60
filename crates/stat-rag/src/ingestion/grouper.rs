//! Maximal-run grouping of chunks by source page

use crate::types::{Chunk, ChunkGroup};

pub struct PageGrouper;

impl PageGrouper {
    /// Lazily yield maximal runs of consecutive chunks sharing a source page.
    ///
    /// A group closes as soon as the page changes or the input ends, so the
    /// caller can enrich and store one page's chunks before the rest of the
    /// document is scanned. Concatenating the yielded groups reproduces the
    /// input sequence exactly.
    pub fn groups<I>(chunks: I) -> PageGroups<I::IntoIter>
    where
        I: IntoIterator<Item = Chunk>,
    {
        PageGroups {
            inner: chunks.into_iter(),
            pending: None,
        }
    }
}

/// Iterator over page groups, see [`PageGrouper::groups`]
pub struct PageGroups<I: Iterator<Item = Chunk>> {
    inner: I,
    /// First chunk of the next group, read while closing the current one
    pending: Option<Chunk>,
}

impl<I: Iterator<Item = Chunk>> Iterator for PageGroups<I> {
    type Item = ChunkGroup;

    fn next(&mut self) -> Option<ChunkGroup> {
        let first = self.pending.take().or_else(|| self.inner.next())?;
        let source_page = first.source_page;
        let mut chunks = vec![first];
        for chunk in self.inner.by_ref() {
            if chunk.source_page == source_page {
                chunks.push(chunk);
            } else {
                self.pending = Some(chunk);
                break;
            }
        }
        Some(ChunkGroup {
            source_page,
            chunks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(source_page: usize, content: &str) -> Chunk {
        Chunk {
            content: content.to_string(),
            source_page,
        }
    }

    #[test]
    fn test_groups_are_maximal_runs() {
        let chunks = vec![
            chunk(0, "a"),
            chunk(0, "b"),
            chunk(1, "c"),
            chunk(1, "d"),
            chunk(1, "e"),
            chunk(0, "f"),
        ];
        let groups: Vec<_> = PageGrouper::groups(chunks).collect();

        let shape: Vec<(usize, usize)> = groups
            .iter()
            .map(|g| (g.source_page, g.chunks.len()))
            .collect();
        // A later return to page 0 starts a fresh group.
        assert_eq!(shape, vec![(0, 2), (1, 3), (0, 1)]);
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        let chunks = vec![
            chunk(0, "a"),
            chunk(2, "b"),
            chunk(2, "c"),
            chunk(5, "d"),
        ];
        let groups: Vec<_> = PageGrouper::groups(chunks.clone()).collect();

        let flattened: Vec<Chunk> = groups.into_iter().flat_map(|g| g.chunks).collect();
        assert_eq!(flattened, chunks);
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert_eq!(PageGrouper::groups(Vec::new()).count(), 0);
    }

    #[test]
    fn test_single_page_document_is_one_group() {
        let chunks = vec![chunk(3, "a"), chunk(3, "b")];
        let groups: Vec<_> = PageGrouper::groups(chunks).collect();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].source_page, 3);
        assert_eq!(groups[0].chunks.len(), 2);
    }
}
