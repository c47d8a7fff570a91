//! Session-stored state.
//!
//! The visitor's interactive shop state lives in the tower-session under a
//! single key; the helpers here read and write it. A second key holds a
//! stable per-client id used to scope theme transitions.

use tower_sessions::Session;
use uuid::Uuid;

use luce_nuova_core::ShopSession;

/// Session keys.
pub mod keys {
    /// Key for the visitor's interactive shop state.
    pub const SHOP: &str = "shop";

    /// Key for the stable per-client id.
    pub const CLIENT_ID: &str = "client_id";
}

/// Load the visitor's shop state, defaulting to a fresh one.
pub async fn load_shop(session: &Session) -> ShopSession {
    session
        .get::<ShopSession>(keys::SHOP)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the visitor's shop state.
///
/// # Errors
///
/// Returns the session store error on failure.
pub async fn save_shop(
    session: &Session,
    shop: &ShopSession,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::SHOP, shop).await
}

/// Get the stable per-client id, minting one on first use.
pub async fn client_id(session: &Session) -> String {
    if let Ok(Some(id)) = session.get::<String>(keys::CLIENT_ID).await {
        return id;
    }

    let id = Uuid::new_v4().to_string();
    if let Err(e) = session.insert(keys::CLIENT_ID, &id).await {
        tracing::error!("Failed to save client id to session: {e}");
    }
    id
}
