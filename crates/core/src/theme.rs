//! The light/dark theme value and its resolution rules.
//!
//! The theme itself is a two-valued setting; the transition locking that
//! guards rapid toggles is timing-dependent and lives with the storefront's
//! theme service, not here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a persisted theme value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown theme: {0:?}")]
pub struct ThemeParseError(String);

/// The visual theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme (the default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Stable string form, used for the cookie value and document class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Resolve the effective theme for a visitor: the saved preference wins,
    /// then the device's own preference, then light.
    #[must_use]
    pub fn resolve(saved: Option<Self>, system: Option<Self>) -> Self {
        saved.or(system).unwrap_or_default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ThemeParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_double_toggle_returns_to_start() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.toggled().toggled(), theme);
        }
    }

    #[test]
    fn test_resolve_precedence() {
        assert_eq!(
            Theme::resolve(Some(Theme::Dark), Some(Theme::Light)),
            Theme::Dark,
            "saved preference wins over the system preference"
        );
        assert_eq!(Theme::resolve(None, Some(Theme::Dark)), Theme::Dark);
        assert_eq!(Theme::resolve(None, None), Theme::Light);
    }

    #[test]
    fn test_parse_round_trip() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.as_str().parse::<Theme>().unwrap(), theme);
        }
        assert!("solarized".parse::<Theme>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let back: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(back, Theme::Light);
    }
}
