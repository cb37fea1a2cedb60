//! Ingestion CLI
//!
//! Run with: cargo run -p stat-rag --bin stat-rag-ingest -- ./RAG_Docs --collection Stat-RAG

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stat_rag::config::{self, RagConfig};
use stat_rag::enrichment::ChunkEnricher;
use stat_rag::ingestion::{ChunkSplitter, Ingestor, TextCleaner};
use stat_rag::providers::chroma::ChromaStore;
use stat_rag::providers::ollama::OllamaExtractor;
use stat_rag::providers::pdf::PdfLoader;
use stat_rag::providers::MetadataExtractor;

#[derive(Parser)]
#[command(
    name = "stat-rag-ingest",
    about = "Ingest a directory of PDFs into a vector store collection"
)]
struct Args {
    /// Directory containing the source documents
    source_dir: PathBuf,
    /// Target collection in the vector store
    #[arg(long, default_value = "Stat-RAG")]
    collection: String,
    /// Chunk size in characters
    #[arg(long)]
    chunk_size: Option<usize>,
    /// Overlap between adjacent chunks in characters
    #[arg(long)]
    chunk_overlap: Option<usize>,
    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stat_rag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config::load_dotenv();
    let args = Args::parse();

    let mut config = RagConfig::load(args.config.as_deref())?;
    if let Some(size) = args.chunk_size {
        config.chunking.chunk_size = size;
    }
    if let Some(overlap) = args.chunk_overlap {
        config.chunking.chunk_overlap = overlap;
    }
    config.validate()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - LLM model: {}", config.llm.model);
    tracing::info!("  - Chunk size: {}", config.chunking.chunk_size);
    tracing::info!("  - Chunk overlap: {}", config.chunking.chunk_overlap);
    tracing::info!("  - Vector store: {}", config.vector_db.url);

    let extractor = Arc::new(OllamaExtractor::new(&config.llm));
    if !extractor.health_check().await.unwrap_or(false) {
        tracing::warn!(
            "Ollama not reachable at {}; enrichment will fall back to default metadata",
            config.llm.base_url
        );
    }

    let store = Arc::new(ChromaStore::new(&config.vector_db)?);
    store.test_connection().await?;

    let ingestor = Ingestor::new(
        &args.source_dir,
        Arc::new(PdfLoader::new()),
        TextCleaner::new(config.cleaning.clone()),
        ChunkSplitter::new(config.chunking.clone())?,
        ChunkEnricher::new(extractor, config.enrichment.fallback_title.as_str()),
        store,
    )?;

    let report = ingestor.ingest_all(&args.collection).await?;
    println!("{}", report.summary());

    Ok(())
}
