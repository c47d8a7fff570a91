//! Product detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tower_sessions::Session;
use tracing::instrument;

use luce_nuova_core::{Product, ProductId};

use crate::error::{AppError, Result};
use crate::middleware::ThemePreference;
use crate::models::session::{client_id, load_shop, save_shop};
use crate::state::AppState;

/// Product detail display data for templates.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub image: Option<String>,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub theme: &'static str,
    pub transitioning: bool,
    pub cart_count: u32,
    pub product: ProductDetailView,
}

/// Display the product detail view and record the selection.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    ThemePreference(theme): ThemePreference,
    Path(id): Path<i64>,
) -> Result<ProductShowTemplate> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .find(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let mut shop = load_shop(&session).await;
    shop.view_product(id);
    save_shop(&session, &shop).await?;

    let client = client_id(&session).await;

    Ok(ProductShowTemplate {
        theme: theme.as_str(),
        transitioning: state.theme().is_marked(&client),
        cart_count: shop.cart.item_count(),
        product: ProductDetailView::from(&product),
    })
}
