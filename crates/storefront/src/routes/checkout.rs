//! Mock checkout route handlers.
//!
//! The payment modal runs in one of two modes: a single-item purchase when a
//! buy-now product is pending, or a whole-cart checkout when none is. No
//! gateway is contacted; confirmation is a local acknowledgment that always
//! succeeds.

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

use luce_nuova_core::{PaymentMode, Product, ProductId, ShopSession};

use crate::error::Result;
use crate::models::session::{load_shop, save_shop};
use crate::state::AppState;

/// Single-item display data for the payment modal.
#[derive(Clone)]
pub struct SingleItemView {
    pub name: String,
    pub category: String,
    pub price: String,
    pub image: Option<String>,
}

impl From<&Product> for SingleItemView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
        }
    }
}

/// One order-summary line for the whole-cart mode.
#[derive(Clone)]
pub struct SummaryLineView {
    pub name: String,
    pub quantity: u32,
    pub line_price: String,
}

/// Payment modal fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/payment_modal.html")]
pub struct PaymentModalTemplate {
    /// Pending single-item purchase; `None` renders the order summary.
    pub single: Option<SingleItemView>,
    pub lines: Vec<SummaryLineView>,
    pub total: String,
}

impl PaymentModalTemplate {
    fn for_shop(shop: &ShopSession) -> Self {
        match &shop.buy_now {
            Some(product) => Self {
                single: Some(SingleItemView::from(product)),
                lines: Vec::new(),
                total: product.price.to_string(),
            },
            None => Self {
                single: None,
                lines: shop
                    .cart
                    .items()
                    .iter()
                    .map(|item| SummaryLineView {
                        name: item.product.name.clone(),
                        quantity: item.quantity,
                        line_price: item.line_total().to_string(),
                    })
                    .collect(),
                total: shop.cart.total().to_string(),
            },
        }
    }
}

/// Payment receipt fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/payment_receipt.html")]
pub struct PaymentReceiptTemplate {
    pub message: String,
}

/// Buy-now form data.
#[derive(Debug, Deserialize)]
pub struct BuyNowForm {
    pub product_id: i64,
}

/// Open the payment modal in whole-cart mode.
///
/// An empty cart has nothing to check out; the request is acknowledged
/// without opening the modal.
#[instrument(skip(session))]
pub async fn begin(session: Session) -> Result<Response> {
    let mut shop = load_shop(&session).await;
    if shop.cart.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    shop.begin_checkout();
    save_shop(&session, &shop).await?;

    Ok(PaymentModalTemplate::for_shop(&shop).into_response())
}

/// Open the payment modal for a single product.
#[instrument(skip(state, session))]
pub async fn buy_now(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<BuyNowForm>,
) -> Result<Response> {
    let Some(product) = state.catalog().find(ProductId::new(form.product_id)).await else {
        return Ok((
            StatusCode::NOT_FOUND,
            Html("<span class=\"checkout-error\">Product not found</span>"),
        )
            .into_response());
    };

    let mut shop = load_shop(&session).await;
    shop.buy_now(product);
    save_shop(&session, &shop).await?;

    Ok(PaymentModalTemplate::for_shop(&shop).into_response())
}

/// Confirm the mock payment.
///
/// Single-item mode reports the product's price and records the purchase in
/// the cart; cart mode reports the cart total and empties it. Both modes
/// close the modal.
#[instrument(skip(session))]
pub async fn confirm(session: Session) -> Result<impl IntoResponse> {
    let mut shop = load_shop(&session).await;
    let receipt = shop.confirm_payment();
    save_shop(&session, &shop).await?;

    let message = match &receipt.mode {
        PaymentMode::SingleItem { product } => format!(
            "Payment of {} for {} processed successfully!",
            receipt.amount, product.name
        ),
        PaymentMode::Cart { lines } => format!(
            "Payment of {} for {lines} items processed successfully!",
            receipt.amount
        ),
    };

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        PaymentReceiptTemplate { message },
    ))
}

/// Close the payment modal without paying.
///
/// Returns an empty body so the HTMX swap clears the modal container.
#[instrument(skip(session))]
pub async fn cancel(session: Session) -> Result<Html<&'static str>> {
    let mut shop = load_shop(&session).await;
    shop.close_payment();
    save_shop(&session, &shop).await?;

    Ok(Html(""))
}
