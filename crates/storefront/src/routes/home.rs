//! Product listing route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use luce_nuova_core::Product;

use crate::error::Result;
use crate::middleware::ThemePreference;
use crate::models::session::{client_id, load_shop, save_shop};
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub image: Option<String>,
}

impl From<&Product> for ProductCardView {
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

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub theme: &'static str,
    pub transitioning: bool,
    pub cart_count: u32,
    pub loading: bool,
    pub products: Vec<ProductCardView>,
}

/// Display the product listing.
///
/// Returning to the listing clears any product selection from the session.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    ThemePreference(theme): ThemePreference,
) -> Result<HomeTemplate> {
    let mut shop = load_shop(&session).await;
    if shop.selected.is_some() {
        shop.clear_selection();
        save_shop(&session, &shop).await?;
    }

    let client = client_id(&session).await;
    let products = state
        .catalog()
        .products()
        .await
        .iter()
        .map(ProductCardView::from)
        .collect();

    Ok(HomeTemplate {
        theme: theme.as_str(),
        transitioning: state.theme().is_marked(&client),
        cart_count: shop.cart.item_count(),
        loading: state.catalog().is_loading().await,
        products,
    })
}
