//! Application services.

pub mod theme;

pub use theme::ThemeService;
