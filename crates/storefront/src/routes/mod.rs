//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Product listing (loading / empty / grid)
//! GET  /products/{id}          - Product detail view
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart drawer (opens the drawer)
//! POST /cart/close             - Close the drawer
//! POST /cart/add               - Add one unit (returns count badge, triggers cart-updated)
//! POST /cart/update            - Set line quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove line (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout (mock payment)
//! POST /checkout               - Open payment modal in whole-cart mode
//! POST /checkout/buy-now       - Open payment modal for one product
//! POST /checkout/confirm       - Confirm mock payment (returns receipt)
//! POST /checkout/cancel        - Close the payment modal
//!
//! # Theme
//! POST /theme/toggle           - Flip the theme (dropped inside the lock window)
//! ```

pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;
pub mod theme;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/close", post(cart::close))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::begin))
        .route("/buy-now", post(checkout::buy_now))
        .route("/confirm", post(checkout::confirm))
        .route("/cancel", post(checkout::cancel))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Product listing
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout routes
        .nest("/checkout", checkout_routes())
        // Theme toggle
        .route("/theme/toggle", post(theme::toggle))
}
