//! Product feed client.
//!
//! The catalog is sourced from one static JSON document shaped
//! `{ "products": [...] }`, fetched with `reqwest` exactly once at startup.
//! No pagination, no auth, no retries - the fetch resolves or rejects once
//! and any failure degrades to an empty catalog at the call site.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use luce_nuova_core::{Price, Product, ProductId};

/// Errors that can occur while loading the product feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A product in the feed failed validation.
    #[error("invalid product {id}: {reason}")]
    InvalidProduct {
        /// Feed id of the offending product.
        id: i64,
        /// What was wrong with it.
        reason: String,
    },

    /// Two products in the feed carried the same id.
    #[error("duplicate product id: {0}")]
    DuplicateId(i64),
}

/// Wire shape of the feed document.
#[derive(Debug, Deserialize)]
struct FeedDocument {
    products: Vec<FeedProduct>,
}

/// Wire shape of one feed product. Prices arrive as JSON numbers and are
/// converted to [`Price`] during validation.
#[derive(Debug, Deserialize)]
struct FeedProduct {
    id: i64,
    name: String,
    description: String,
    price: f64,
    image: Option<String>,
    category: String,
}

impl TryFrom<FeedProduct> for Product {
    type Error = FeedError;

    fn try_from(raw: FeedProduct) -> Result<Self, FeedError> {
        let price = Price::from_f64(raw.price).map_err(|e| FeedError::InvalidProduct {
            id: raw.id,
            reason: e.to_string(),
        })?;

        Ok(Self {
            id: ProductId::new(raw.id),
            name: raw.name,
            description: raw.description,
            price,
            image: raw.image,
            category: raw.category,
        })
    }
}

/// Client for the static product feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    url: Url,
}

impl FeedClient {
    /// Create a new feed client.
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// Fetch and validate the feed document.
    ///
    /// # Errors
    ///
    /// Returns a [`FeedError`] on HTTP failure, non-success status, malformed
    /// JSON, or invalid product data.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<Vec<Product>, FeedError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let products = parse_feed(&body)?;
        debug!(count = products.len(), "product feed loaded");
        Ok(products)
    }
}

/// Parse and validate a feed document.
fn parse_feed(raw: &str) -> Result<Vec<Product>, FeedError> {
    let document: FeedDocument = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(document.products.len());
    let mut products = Vec::with_capacity(document.products.len());
    for raw_product in document.products {
        if !seen.insert(raw_product.id) {
            return Err(FeedError::DuplicateId(raw_product.id));
        }
        products.push(Product::try_from(raw_product)?);
    }

    Ok(products)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "products": [
            {
                "id": 1,
                "name": "Aurora Desk Lamp",
                "description": "Warm dimmable light.",
                "price": 49.99,
                "image": "https://cdn.example.com/lamp.jpg",
                "category": "Lighting"
            },
            {
                "id": 2,
                "name": "Nimbus Mug",
                "description": "Double-walled ceramic.",
                "price": 18.0,
                "image": null,
                "category": "Kitchen"
            }
        ]
    }"#;

    #[test]
    fn test_parse_feed_valid_document() {
        let products = parse_feed(SAMPLE).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, ProductId::new(1));
        assert_eq!(products[0].price.to_string(), "$49.99");
        assert_eq!(products[1].image, None);
    }

    #[test]
    fn test_parse_feed_empty_products_is_valid() {
        let products = parse_feed(r#"{"products": []}"#).unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_parse_feed_rejects_negative_price() {
        let raw = r#"{"products": [{"id": 1, "name": "n", "description": "d", "price": -1.0, "category": "c"}]}"#;
        let err = parse_feed(raw).unwrap_err();
        assert!(matches!(err, FeedError::InvalidProduct { id: 1, .. }));
    }

    #[test]
    fn test_parse_feed_rejects_duplicate_ids() {
        let raw = r#"{"products": [
            {"id": 1, "name": "a", "description": "d", "price": 1.0, "category": "c"},
            {"id": 1, "name": "b", "description": "d", "price": 2.0, "category": "c"}
        ]}"#;
        let err = parse_feed(raw).unwrap_err();
        assert!(matches!(err, FeedError::DuplicateId(1)));
    }

    #[test]
    fn test_parse_feed_rejects_malformed_document() {
        assert!(matches!(
            parse_feed("not json").unwrap_err(),
            FeedError::Parse(_)
        ));
        assert!(matches!(
            parse_feed(r#"{"items": []}"#).unwrap_err(),
            FeedError::Parse(_)
        ));
    }

    #[test]
    fn test_missing_image_field_defaults_to_none() {
        let raw = r#"{"products": [{"id": 1, "name": "n", "description": "d", "price": 1.0, "category": "c"}]}"#;
        let products = parse_feed(raw).unwrap();
        assert_eq!(products[0].image, None);
    }
}
