//! Ollama-backed metadata extraction
//!
//! Calls `/api/generate` with JSON-constrained output and zero temperature.
//! Enrichment is best-effort: a failed call surfaces an extraction error for
//! the enricher's fallback instead of being retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::enrichment::PromptBuilder;
use crate::error::{Error, Result};
use crate::providers::MetadataExtractor;
use crate::types::ChunkAnnotation;

pub struct OllamaExtractor {
    client: Client,
    config: LlmConfig,
}

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    format: String,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaExtractor {
    pub fn new(config: &LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl MetadataExtractor for OllamaExtractor {
    async fn extract(&self, excerpt: &str) -> Result<ChunkAnnotation> {
        let url = format!("{}/api/generate", self.config.base_url);
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: PromptBuilder::build_enrichment_prompt(excerpt),
            stream: false,
            format: "json".to_string(),
            options: GenerateOptions {
                temperature: self.config.temperature,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::extraction(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::extraction(format!("HTTP {}", response.status())));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::extraction(format!("failed to parse response: {e}")))?;

        let annotation: ChunkAnnotation = serde_json::from_str(generated.response.trim())
            .map_err(|e| Error::extraction(format!("malformed model output: {e}")))?;
        Ok(annotation)
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.config.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "ollama"
    }
}
