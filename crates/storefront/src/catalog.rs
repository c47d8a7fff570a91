//! Shared catalog state.
//!
//! The catalog starts in a `Loading` state, becomes `Ready` exactly once when
//! the background feed load completes (successfully or not), and is read-only
//! from then on. Handlers take cheap clones of the handle.

use std::sync::Arc;

use tokio::sync::RwLock;

use luce_nuova_core::{Product, ProductId};

/// Load state of the catalog.
#[derive(Debug, Clone, Default)]
enum CatalogState {
    /// The initial feed fetch has not completed yet.
    #[default]
    Loading,
    /// The feed fetch completed; a failed load yields an empty product list.
    Ready(Vec<Product>),
}

/// Shared handle to the catalog.
///
/// Cheaply cloneable; all clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    inner: Arc<RwLock<CatalogState>>,
}

impl Catalog {
    /// Create a catalog in the `Loading` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the initial feed load is still pending.
    pub async fn is_loading(&self) -> bool {
        matches!(*self.inner.read().await, CatalogState::Loading)
    }

    /// Snapshot of the products. Empty while loading or after a failed load.
    pub async fn products(&self) -> Vec<Product> {
        match &*self.inner.read().await {
            CatalogState::Loading => Vec::new(),
            CatalogState::Ready(products) => products.clone(),
        }
    }

    /// Look up a product by id.
    pub async fn find(&self, id: ProductId) -> Option<Product> {
        match &*self.inner.read().await {
            CatalogState::Loading => None,
            CatalogState::Ready(products) => products.iter().find(|p| p.id == id).cloned(),
        }
    }

    /// Mark the catalog ready with the given products.
    pub async fn set_ready(&self, products: Vec<Product>) {
        *self.inner.write().await = CatalogState::Ready(products);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use luce_nuova_core::Price;

    fn product(id: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::from_f64(10.0).unwrap(),
            image: None,
            category: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_catalog_starts_loading_and_empty() {
        let catalog = Catalog::new();
        assert!(catalog.is_loading().await);
        assert!(catalog.products().await.is_empty());
        assert_eq!(catalog.find(ProductId::new(1)).await, None);
    }

    #[tokio::test]
    async fn test_set_ready_publishes_products() {
        let catalog = Catalog::new();
        catalog.set_ready(vec![product(1), product(2)]).await;

        assert!(!catalog.is_loading().await);
        assert_eq!(catalog.products().await.len(), 2);
        assert_eq!(
            catalog.find(ProductId::new(2)).await.unwrap().name,
            "Product 2"
        );
        assert_eq!(catalog.find(ProductId::new(3)).await, None);
    }

    #[tokio::test]
    async fn test_failed_load_is_ready_and_empty() {
        let catalog = Catalog::new();
        catalog.set_ready(Vec::new()).await;

        assert!(!catalog.is_loading().await);
        assert!(catalog.products().await.is_empty());
    }
}
