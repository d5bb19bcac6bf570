// src/products/summarizer.rs

//! Grounds a completion-service answer in retrieved product records.

use crate::error::ProductError;
use crate::llm::TextGenerator;
use crate::products::Product;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProductSummarizer {
    generator: Arc<dyn TextGenerator>,
}

impl ProductSummarizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// One descriptive line per record for the grounding context.
    pub fn context_line(product: &Product) -> String {
        let materials = if product.materials.is_empty() {
            "No material info available".to_string()
        } else {
            product
                .materials
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };

        format!(
            "- {} | {} | Variations: {} | Price: {} | Volume: {} | Height: {} | Material: {}",
            product.name,
            product.product_info.join(", "),
            product.variations.join(", "),
            product.price,
            product.measurements.get("Volume").map(String::as_str).unwrap_or("N/A"),
            product.measurements.get("Height").map(String::as_str).unwrap_or("N/A"),
            materials,
        )
    }

    /// Answer `query` using only the concatenated record context. An empty
    /// record list still goes to the completion service with empty context;
    /// it is relied on to produce a "nothing found" style answer.
    pub async fn summarize(
        &self,
        query: &str,
        products: &[Product],
    ) -> Result<String, ProductError> {
        let content = products
            .iter()
            .map(Self::context_line)
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "You are a helpful assistant for ZUS Coffee product discovery. \
             Answer the question below based on this product info:\n\n\
             {content}\n\n\
             User Question: {query}\n\n\
             Answer:"
        );

        let answer = self
            .generator
            .generate(&prompt)
            .await
            .map_err(ProductError::Generation)?;

        Ok(answer.trim().to_string())
    }
}
