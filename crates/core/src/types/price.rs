//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are never represented as floating point internally. The product
//! feed carries JSON numbers, so construction from `f64` happens exactly once
//! at that boundary, via [`Price::from_f64`], which also enforces the
//! non-negativity invariant.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error constructing a [`Price`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The amount was negative.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),

    /// The amount was NaN or infinite.
    #[error("price is not a finite number")]
    NotFinite,
}

/// A non-negative monetary amount.
///
/// Displays as `$x.xx`. Arithmetic is closed over non-negative values:
/// adding prices and scaling by a quantity cannot produce a negative amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a JSON number.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is NaN, infinite, or negative.
    pub fn from_f64(amount: f64) -> Result<Self, PriceError> {
        let decimal = Decimal::from_f64(amount).ok_or(PriceError::NotFinite)?;
        Self::new(decimal)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_rejects_negative() {
        assert_eq!(
            Price::from_f64(-1.0),
            Err(PriceError::Negative(Decimal::from_f64(-1.0).unwrap()))
        );
    }

    #[test]
    fn test_price_rejects_non_finite() {
        assert_eq!(Price::from_f64(f64::NAN), Err(PriceError::NotFinite));
        assert_eq!(Price::from_f64(f64::INFINITY), Err(PriceError::NotFinite));
    }

    #[test]
    fn test_price_display_two_decimals() {
        assert_eq!(Price::from_f64(10.0).unwrap().to_string(), "$10.00");
        assert_eq!(Price::from_f64(19.99).unwrap().to_string(), "$19.99");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_price_arithmetic() {
        let price = Price::from_f64(10.0).unwrap();
        assert_eq!(price * 2, Price::from_f64(20.0).unwrap());
        assert_eq!(price + price, Price::from_f64(20.0).unwrap());

        let total: Price = [price, price * 3].into_iter().sum();
        assert_eq!(total, Price::from_f64(40.0).unwrap());
    }

    #[test]
    fn test_price_serde_as_number() {
        let price = Price::from_f64(12.5).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "12.5");
        let back: Price = serde_json::from_str("12.5").unwrap();
        assert_eq!(back, price);
    }
}
