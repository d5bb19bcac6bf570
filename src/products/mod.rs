// src/products/mod.rs

//! Product catalogue types and the semantic search pipeline.

pub mod index;
pub mod retriever;
pub mod summarizer;

pub use retriever::SemanticRetriever;
pub use summarizer::ProductSummarizer;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A catalogue record, one per stored embedding. Identity is `name` (not
/// enforced unique). Every field is populated after normalization so
/// downstream formatting never branches on missing keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: String,
    pub variations: Vec<String>,
    pub product_info: Vec<String>,
    pub measurements: BTreeMap<String, String>,
    pub materials: BTreeMap<String, String>,
    pub url: String,
}

impl Product {
    /// Normalize a raw index payload into a fully-populated record.
    ///
    /// Missing or empty optional fields get explicit defaults: unknown name,
    /// "N/A" price, empty variation list, a one-element sentinel for missing
    /// descriptive text, placeholder measurement/material maps, "#" URL.
    pub fn from_payload(payload: &Value) -> Self {
        let name = payload
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown Product")
            .to_string();

        let price = payload
            .get("price")
            .and_then(Value::as_str)
            .unwrap_or("N/A")
            .to_string();

        let variations = string_list(payload.get("variations")).unwrap_or_default();

        let product_info = string_list(payload.get("product_info"))
            .filter(|info| !info.is_empty())
            .unwrap_or_else(|| vec!["No product info available".to_string()]);

        let measurements = string_map(payload.get("measurements"))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                BTreeMap::from([
                    ("Height".to_string(), "N/A".to_string()),
                    ("Volume".to_string(), "N/A".to_string()),
                ])
            });

        let materials = string_map(payload.get("materials"))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                BTreeMap::from([(
                    "Note".to_string(),
                    "No material info available".to_string(),
                )])
            });

        let url = payload
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or("#")
            .to_string();

        Self {
            name,
            price,
            variations,
            product_info,
            measurements,
            materials,
            url,
        }
    }
}

fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    value.and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect()
    })
}

fn string_map(value: Option<&Value>) -> Option<BTreeMap<String, String>> {
    value.and_then(Value::as_object).map(|entries| {
        entries
            .iter()
            .map(|(k, v)| {
                let rendered = match v.as_str() {
                    Some(s) => s.to_string(),
                    None => v.to_string(),
                };
                (k.clone(), rendered)
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_defaults_for_empty_payload() {
        let product = Product::from_payload(&json!({}));

        assert_eq!(product.name, "Unknown Product");
        assert_eq!(product.price, "N/A");
        assert!(product.variations.is_empty());
        assert_eq!(product.product_info, vec!["No product info available"]);
        assert_eq!(product.measurements.get("Height").map(String::as_str), Some("N/A"));
        assert_eq!(product.measurements.get("Volume").map(String::as_str), Some("N/A"));
        assert_eq!(
            product.materials.get("Note").map(String::as_str),
            Some("No material info available")
        );
        assert_eq!(product.url, "#");
    }

    #[test]
    fn test_normalize_preserves_present_fields() {
        let payload = json!({
            "name": "ZUS All-Day Cup",
            "price": "RM 55.00",
            "variations": ["500ml", "650ml"],
            "product_info": ["Double-wall insulated", "BPA free"],
            "measurements": {"Height": "18cm", "Volume": "500ml"},
            "materials": {"Stainless Steel": "body", "PP": "lid"},
            "url": "https://shop.zuscoffee.com/all-day-cup"
        });

        let product = Product::from_payload(&payload);

        assert_eq!(product.name, "ZUS All-Day Cup");
        assert_eq!(product.price, "RM 55.00");
        assert_eq!(product.variations, vec!["500ml", "650ml"]);
        assert_eq!(product.product_info, vec!["Double-wall insulated", "BPA free"]);
        assert_eq!(product.measurements.get("Height").map(String::as_str), Some("18cm"));
        assert!(product.materials.contains_key("Stainless Steel"));
        assert_eq!(product.url, "https://shop.zuscoffee.com/all-day-cup");
    }

    #[test]
    fn test_normalize_treats_empty_collections_as_missing() {
        let payload = json!({
            "name": "ZUS Frozee Cold Cup",
            "product_info": [],
            "measurements": {},
            "materials": {}
        });

        let product = Product::from_payload(&payload);

        assert_eq!(product.product_info, vec!["No product info available"]);
        assert_eq!(product.measurements.get("Volume").map(String::as_str), Some("N/A"));
        assert!(product.materials.contains_key("Note"));
    }
}
