//! Request middleware and extractors.

pub mod session;
pub mod theme;

pub use session::create_session_layer;
pub use theme::{ThemePreference, theme_cookie};
