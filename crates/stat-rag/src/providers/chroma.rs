//! Chroma vector store client (REST API)

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;

use crate::config::VectorDbConfig;
use crate::error::{Error, Result};
use crate::providers::VectorStore;
use crate::types::EnrichedChunk;

pub struct ChromaStore {
    client: Client,
    base_url: String,
    token: Option<String>,
    /// Collection name -> server-side collection id
    collections: Mutex<HashMap<String, String>>,
}

#[derive(Deserialize)]
struct CollectionInfo {
    id: String,
    name: String,
}

impl ChromaStore {
    pub fn new(config: &VectorDbConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(Error::config("vector store URL is not set"));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            collections: Mutex::new(HashMap::new()),
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .request(method, format!("{}/api/v1{}", self.base_url, path));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Resolve (get-or-create) a collection id, cached per name
    async fn collection_id(&self, name: &str) -> Result<String> {
        let mut cache = self.collections.lock().await;
        if let Some(id) = cache.get(name) {
            return Ok(id.clone());
        }

        let response = self
            .request(Method::POST, "/collections")
            .json(&json!({ "name": name, "get_or_create": true }))
            .send()
            .await
            .map_err(|e| Error::storage(format!("collection lookup failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::storage(format!(
                "collection lookup failed: HTTP {}",
                response.status()
            )));
        }

        let info: CollectionInfo = response
            .json()
            .await
            .map_err(|e| Error::storage(format!("malformed collection response: {e}")))?;
        cache.insert(name.to_string(), info.id.clone());
        Ok(info.id)
    }

    /// List collections and log what the server reports
    pub async fn test_connection(&self) -> Result<()> {
        let response = self
            .request(Method::GET, "/collections")
            .send()
            .await
            .map_err(|e| Error::storage(format!("connection test failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::storage(format!(
                "connection test failed: HTTP {}",
                response.status()
            )));
        }

        let collections: Vec<CollectionInfo> = response
            .json()
            .await
            .map_err(|e| Error::storage(format!("malformed collections response: {e}")))?;
        tracing::info!(
            "connected to vector store at {}, {} collections",
            self.base_url,
            collections.len()
        );
        for collection in &collections {
            tracing::debug!(name = %collection.name, id = %collection.id, "collection");
        }
        Ok(())
    }
}

#[async_trait]
impl VectorStore for ChromaStore {
    async fn store(
        &self,
        collection: &str,
        ids: &[String],
        chunks: &[EnrichedChunk],
    ) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let collection_id = self.collection_id(collection).await?;

        let documents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let metadatas: Vec<_> = chunks.iter().map(|c| &c.metadata).collect();

        let response = self
            .request(Method::POST, &format!("/collections/{collection_id}/upsert"))
            .json(&json!({
                "ids": ids,
                "documents": documents,
                "metadatas": metadatas,
            }))
            .send()
            .await
            .map_err(|e| Error::storage(format!("upsert failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::storage(format!(
                "upsert failed: HTTP {status} - {body}"
            )));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<bool> {
        match self.request(Method::GET, "/heartbeat").send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "chroma"
    }
}
