// src/llm/embeddings.rs
// Query embeddings for semantic product search.

use crate::config::CONFIG;
use crate::llm::client::OpenAIClient;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Response from the embeddings API
#[derive(Debug, Deserialize)]
pub struct EmbeddingResponse {
    pub data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingData {
    pub embedding: Vec<f32>,
}

/// Embedding seam. The implementation must use the same model family that
/// indexed the stored product records.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

#[async_trait]
impl Embedder for OpenAIClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let body = json!({
            "model": CONFIG.embedding_model,
            "input": text,
            "dimensions": CONFIG.embedding_dimensions,
        });

        let url = format!("{}/embeddings", self.api_base.trim_end_matches('/'));
        let resp = self
            .client
            .post(&url)
            .header(self.auth_header().0, self.auth_header().1.clone())
            .json(&body)
            .send()
            .await
            .context("Failed to send embeddings request")?;

        if !resp.status().is_success() {
            return Err(anyhow!(
                "embeddings request failed: {}",
                resp.text().await.unwrap_or_default()
            ));
        }

        let parsed: EmbeddingResponse = resp
            .json()
            .await
            .context("Failed to parse embeddings response")?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| anyhow!("Empty embeddings response"))
    }
}
