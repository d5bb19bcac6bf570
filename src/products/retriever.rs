// src/products/retriever.rs

//! Embeds a query, searches the vector index, and normalizes the hits.

use crate::error::ProductError;
use crate::llm::Embedder;
use crate::products::Product;
use crate::products::index::VectorSearch;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_TOP_K: usize = 3;

#[derive(Clone)]
pub struct SemanticRetriever {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorSearch>,
}

impl SemanticRetriever {
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn VectorSearch>) -> Self {
        Self { embedder, index }
    }

    /// Return the `k` catalogue records closest to `query`, in the index's
    /// proximity order. Each payload is normalized to a fully-populated
    /// `Product`.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Product>, ProductError> {
        let embedding = self
            .embedder
            .embed(query)
            .await
            .map_err(ProductError::Embedding)?;

        let points = self
            .index
            .search(&embedding, k)
            .await
            .map_err(ProductError::Search)?;

        debug!(hits = points.len(), "vector search complete");

        let products = points
            .iter()
            .map(|point| Product::from_payload(point.get("payload").unwrap_or(point)))
            .collect();

        Ok(products)
    }
}
