//! Configuration for the ingestion pipeline

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{Error, Result};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Main pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Page cleaning configuration
    #[serde(default)]
    pub cleaning: CleaningConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Enrichment configuration
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    /// Ollama/LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Vector database configuration
    #[serde(default)]
    pub vector_db: VectorDbConfig,
}

impl RagConfig {
    /// Load configuration: TOML file when given, defaults otherwise, then
    /// environment overrides. Fails fast on values the run cannot start
    /// without.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config: Self = match path {
            Some(p) => toml::from_str(&std::fs::read_to_string(p)?)
                .map_err(|e| Error::config(format!("invalid config file: {e}")))?,
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Environment overrides (call `load_dotenv()` first)
    fn apply_env(&mut self) {
        if let Some(v) = env_opt("STAT_RAG_DB_URL") {
            self.vector_db.url = v;
        }
        if let Some(v) = env_opt("STAT_RAG_DB_TOKEN") {
            self.vector_db.token = Some(v);
        }
        if let Some(v) = env_opt("OLLAMA_URL") {
            self.llm.base_url = v;
        }
    }

    /// Validate startup requirements
    pub fn validate(&self) -> Result<()> {
        if self.vector_db.url.is_empty() {
            return Err(Error::config(
                "vector store URL is not set (STAT_RAG_DB_URL)",
            ));
        }
        if self.llm.base_url.is_empty() {
            return Err(Error::config("LLM base URL is not set (OLLAMA_URL)"));
        }
        if self.chunking.chunk_size <= self.chunking.chunk_overlap {
            return Err(Error::SplitterConfig {
                chunk_size: self.chunking.chunk_size,
                chunk_overlap: self.chunking.chunk_overlap,
            });
        }
        Ok(())
    }
}

/// Header/footer stripping and normalization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Lines sampled from the top of every page
    pub top_lines: usize,
    /// Lines sampled from the bottom of every page
    pub bottom_lines: usize,
    /// Fraction of pages a sampled line must appear on to count as boilerplate
    pub freq_threshold: f64,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            top_lines: 2,
            bottom_lines: 2,
            freq_threshold: 0.7,
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between adjacent chunks in characters
    pub chunk_overlap: usize,
    /// Chunks at or below this length are discarded as noise
    pub min_chunk_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 100,
            chunk_overlap: 20,
            min_chunk_chars: 50,
        }
    }
}

/// Enrichment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Title recorded for chunks whose source document carries none
    pub fallback_title: String,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            fallback_title: "Testing Statistical Assumptions".to_string(),
        }
    }
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Model used for metadata extraction
    pub model: String,
    /// Temperature; zero for consistent factual metadata
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.1".to_string(),
            temperature: 0.0,
            timeout_secs: 120,
        }
    }
}

/// Vector database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorDbConfig {
    /// Store endpoint URL
    pub url: String,
    /// Optional bearer token
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}
