//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the visitor's session; mutations load it, apply
//! one transition, and save it back before rendering a fragment.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use luce_nuova_core::{Cart, CartItem, ProductId};

use crate::error::Result;
use crate::models::session::{load_shop, save_shop};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.product.id.as_i64(),
            name: item.product.name.clone(),
            category: item.product.category.clone(),
            quantity: item.quantity,
            price: item.product.price.to_string(),
            line_price: item.line_total().to_string(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i64,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i64,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i64,
}

/// Cart drawer fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_drawer.html")]
pub struct CartDrawerTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display the cart drawer and mark it open.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartDrawerTemplate> {
    let mut shop = load_shop(&session).await;
    shop.open_cart();
    save_shop(&session, &shop).await?;

    Ok(CartDrawerTemplate {
        cart: CartView::from(&shop.cart),
    })
}

/// Close the cart drawer.
///
/// Returns an empty body so the HTMX swap clears the drawer container.
#[instrument(skip(session))]
pub async fn close(session: Session) -> Result<Html<&'static str>> {
    let mut shop = load_shop(&session).await;
    shop.close_cart();
    save_shop(&session, &shop).await?;

    Ok(Html(""))
}

/// Add one unit of a product to the cart (HTMX).
///
/// Returns the cart count badge with an HTMX trigger so other fragments can
/// refresh themselves.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let Some(product) = state.catalog().find(ProductId::new(form.product_id)).await else {
        return Ok((
            StatusCode::NOT_FOUND,
            Html("<span class=\"cart-error\">Product not found</span>"),
        )
            .into_response());
    };

    let mut shop = load_shop(&session).await;
    shop.cart.add(product);
    save_shop(&session, &shop).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: shop.cart.item_count(),
        },
    )
        .into_response())
}

/// Update a cart line's quantity (HTMX).
///
/// Quantities below 1 and unknown ids leave the cart unchanged; the current
/// cart is re-rendered either way.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<impl IntoResponse> {
    let mut shop = load_shop(&session).await;
    shop.cart
        .set_quantity(ProductId::new(form.product_id), form.quantity);
    save_shop(&session, &shop).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&shop.cart),
        },
    ))
}

/// Remove a line from the cart (HTMX). Unknown ids are a no-op.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<impl IntoResponse> {
    let mut shop = load_shop(&session).await;
    shop.cart.remove(ProductId::new(form.product_id));
    save_shop(&session, &shop).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&shop.cart),
        },
    ))
}

/// Get the cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> CartCountTemplate {
    let shop = load_shop(&session).await;
    CartCountTemplate {
        count: shop.cart.item_count(),
    }
}
