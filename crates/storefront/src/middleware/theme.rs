//! Theme preference extraction and persistence.
//!
//! The saved preference lives in a long-lived `theme` cookie on the device;
//! when absent, the browser's `Sec-CH-Prefers-Color-Scheme` client hint
//! stands in, and failing that the theme defaults to light. Handlers receive
//! the resolved value through the [`ThemePreference`] extractor rather than
//! any ambient lookup.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use tower_sessions::cookie::{Cookie, SameSite, time};

use luce_nuova_core::Theme;

/// Cookie holding the saved theme preference.
pub const THEME_COOKIE_NAME: &str = "theme";

/// Client hint carrying the device's color-scheme preference.
const COLOR_SCHEME_HINT: &str = "sec-ch-prefers-color-scheme";

/// How long the saved preference persists on the device.
const THEME_COOKIE_MAX_AGE: time::Duration = time::Duration::days(365);

/// The resolved theme preference for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreference(pub Theme);

impl<S> FromRequestParts<S> for ThemePreference
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let saved = saved_theme(&parts.headers);
        let system = system_theme(&parts.headers);
        Ok(Self(Theme::resolve(saved, system)))
    }
}

/// Build the `Set-Cookie` value persisting a theme choice.
///
/// Not `HttpOnly`: the preference is device-local presentation state, not a
/// credential, and stylesheets and scripts may read it.
#[must_use]
pub fn theme_cookie(theme: Theme) -> String {
    Cookie::build((THEME_COOKIE_NAME, theme.as_str()))
        .path("/")
        .max_age(THEME_COOKIE_MAX_AGE)
        .same_site(SameSite::Lax)
        .build()
        .to_string()
}

/// Read the saved preference from the request cookies.
fn saved_theme(headers: &HeaderMap) -> Option<Theme> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == THEME_COOKIE_NAME)
        .and_then(|cookie| cookie.value().parse().ok())
}

/// Read the device preference from the color-scheme client hint.
fn system_theme(headers: &HeaderMap) -> Option<Theme> {
    headers
        .get(COLOR_SCHEME_HINT)?
        .to_str()
        .ok()?
        .trim()
        .trim_matches('"')
        .parse()
        .ok()
}
