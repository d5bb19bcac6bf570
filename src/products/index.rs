// src/products/index.rs

//! Qdrant-backed nearest-neighbor lookup over the product catalogue.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

/// Nearest-neighbor index seam: given a query embedding, return the k closest
/// stored points (with payloads), closest first. The index owns the ranking;
/// callers must not re-order.
#[async_trait]
pub trait VectorSearch: Send + Sync {
    async fn search(&self, embedding: &[f32], k: usize) -> Result<Vec<Value>>;
}

/// Product index served by Qdrant's REST API. The collection is populated by
/// the ingestion pipeline; this client only reads.
pub struct QdrantProductIndex {
    pub client: Client,
    pub base_url: String,
    pub collection: String,
}

impl QdrantProductIndex {
    pub fn new<S: Into<String>>(client: Client, base_url: S, collection: S) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            collection: collection.into(),
        }
    }
}

#[async_trait]
impl VectorSearch for QdrantProductIndex {
    async fn search(&self, embedding: &[f32], k: usize) -> Result<Vec<Value>> {
        let url = format!(
            "{}/collections/{}/points/search",
            self.base_url, self.collection
        );

        let req_body = json!({
            "vector": embedding,
            "limit": k,
            "with_payload": true,
        });

        let resp = self
            .client
            .post(&url)
            .json(&req_body)
            .send()
            .await
            .map_err(|e| anyhow!("Qdrant search error: {}", e))?;

        if !resp.status().is_success() {
            return Err(anyhow!(
                "Qdrant search failed: {}",
                resp.text().await.unwrap_or_default()
            ));
        }

        let body: Value = resp.json().await?;
        let points = body
            .get("result")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Ok(points)
    }
}
