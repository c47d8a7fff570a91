//! Theme toggle route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::middleware::{ThemePreference, theme_cookie};
use crate::models::session::client_id;
use crate::state::AppState;

/// Theme toggle fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/theme_toggle.html")]
pub struct ThemeToggleTemplate {
    pub theme: &'static str,
    pub transitioning: bool,
}

/// Flip the theme for this client.
///
/// Accepted toggles persist the new value via `Set-Cookie` and render the
/// fragment with the transition marker; toggles inside the lock window are
/// dropped and re-render the current state unchanged.
#[instrument(skip(state, session))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    ThemePreference(current): ThemePreference,
) -> Response {
    let client = client_id(&session).await;

    match state.theme().try_toggle(&client, current) {
        Some(next) => (
            AppendHeaders([
                ("set-cookie", theme_cookie(next)),
                ("hx-trigger", "theme-changed".to_string()),
            ]),
            ThemeToggleTemplate {
                theme: next.as_str(),
                transitioning: true,
            },
        )
            .into_response(),
        None => ThemeToggleTemplate {
            theme: current.as_str(),
            transitioning: state.theme().is_marked(&client),
        }
        .into_response(),
    }
}
