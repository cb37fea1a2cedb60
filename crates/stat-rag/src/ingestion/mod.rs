//! Document ingestion pipeline: cleaning, splitting, grouping, orchestration

mod cleaner;
mod grouper;
mod processor;
mod splitter;

pub use cleaner::TextCleaner;
pub use grouper::{PageGrouper, PageGroups};
pub use processor::Ingestor;
pub use splitter::{ChunkSplitter, SplitReport};
