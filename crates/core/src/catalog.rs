//! The product record.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A purchasable product.
///
/// Immutable once loaded from the feed; owned by the catalog for the process
/// lifetime and copied into carts and sessions by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID within the catalog.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description shown on the detail view.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Optional image URL; listings render a placeholder when absent.
    pub image: Option<String>,
    /// Category label (display only, no taxonomy).
    pub category: String,
}
