//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::feed::FeedClient;
use crate::services::ThemeService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the catalog, feed client, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    feed: FeedClient,
    theme: ThemeService,
}

impl AppState {
    /// Create a new application state with an empty, loading catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let feed = FeedClient::new(config.products_feed_url.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Catalog::new(),
                feed,
                theme: ThemeService::new(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the shared catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the product feed client.
    #[must_use]
    pub fn feed(&self) -> &FeedClient {
        &self.inner.feed
    }

    /// Get a reference to the theme transition service.
    #[must_use]
    pub fn theme(&self) -> &ThemeService {
        &self.inner.theme
    }

    /// Start the one-time background load of the product feed.
    ///
    /// Any failure is logged and degrades to an empty catalog; the storefront
    /// stays up either way.
    pub fn start_catalog_load(&self) {
        let state = self.clone();
        tokio::spawn(async move {
            let products = match state.feed().fetch().await {
                Ok(products) => products,
                Err(e) => {
                    tracing::error!("Failed to load product feed: {e}");
                    Vec::new()
                }
            };
            state.catalog().set_ready(products).await;
        });
    }
}
