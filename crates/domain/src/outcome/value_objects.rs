//! Value objects for the outcome domain.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ISO 4217-style currency code (e.g. "EUR", "CZK").
///
/// The code is treated as an opaque tag; the read model never interprets
/// it beyond equality checks. Rate logic belongs to the price converter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a new currency code from a string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CurrencyCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors arising from price arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// Two prices in different currencies were combined without conversion.
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        left: CurrencyCode,
        right: CurrencyCode,
    },
}

/// An amount of money in a specific currency.
///
/// The amount is stored in minor units (cents) to avoid floating point
/// issues. Prices in different currencies never mix silently; addition
/// across currencies is a [`PriceError`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in minor units (e.g. 1050 = 10.50).
    cents: i64,
    currency: CurrencyCode,
}

impl Price {
    /// Creates a price from minor units and a currency.
    pub fn new(cents: i64, currency: impl Into<CurrencyCode>) -> Self {
        Self {
            cents,
            currency: currency.into(),
        }
    }

    /// The additive identity in the given currency.
    pub fn zero(currency: impl Into<CurrencyCode>) -> Self {
        Self::new(0, currency)
    }

    /// Returns the amount in minor units.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the currency of this price.
    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Adds another price of the same currency.
    ///
    /// Fails with [`PriceError::CurrencyMismatch`] when the currencies
    /// differ; callers convert first, then sum.
    pub fn add(&self, other: &Price) -> Result<Price, PriceError> {
        if self.currency != other.currency {
            return Err(PriceError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }
        Ok(Price {
            cents: self.cents + other.cents,
            currency: self.currency.clone(),
        })
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.abs();
        write!(f, "{}{}.{:02} {}", sign, abs / 100, abs % 100, self.currency)
    }
}

/// A price together with the calendar date it was observed on.
///
/// Currency conversion uses the rate applicable at that date, so totals
/// spanning a period respect historical rate variation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFixed {
    price: Price,
    when: NaiveDate,
}

impl PriceFixed {
    /// Creates a dated price.
    pub fn new(price: Price, when: NaiveDate) -> Self {
        Self { price, when }
    }

    /// Returns the price.
    pub fn price(&self) -> &Price {
        &self.price
    }

    /// Returns the date the price applies to.
    pub fn when(&self) -> NaiveDate {
        self.when
    }
}

/// ARGB color carried by category metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Creates a fully opaque color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 0xFF, r, g, b }
    }

    /// Creates a color with an explicit alpha channel.
    pub fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_add_same_currency() {
        let a = Price::new(1000, "EUR");
        let b = Price::new(250, "EUR");
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.cents(), 1250);
        assert_eq!(sum.currency().as_str(), "EUR");
    }

    #[test]
    fn price_add_mismatched_currency_fails() {
        let a = Price::new(1000, "EUR");
        let b = Price::new(1000, "CZK");
        let err = a.add(&b).unwrap_err();
        assert_eq!(
            err,
            PriceError::CurrencyMismatch {
                left: "EUR".into(),
                right: "CZK".into(),
            }
        );
    }

    #[test]
    fn price_zero_is_identity() {
        let zero = Price::zero("EUR");
        assert!(zero.is_zero());
        let a = Price::new(730, "EUR");
        assert_eq!(zero.add(&a).unwrap(), a);
    }

    #[test]
    fn price_display() {
        assert_eq!(Price::new(1234, "EUR").to_string(), "12.34 EUR");
        assert_eq!(Price::new(5, "CZK").to_string(), "0.05 CZK");
        assert_eq!(Price::new(-1234, "USD").to_string(), "-12.34 USD");
    }

    #[test]
    fn price_serialization_roundtrip() {
        let price = Price::new(999, "GBP");
        let json = serde_json::to_string(&price).unwrap();
        let deserialized: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(price, deserialized);
    }

    #[test]
    fn price_fixed_carries_date() {
        let when = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let fixed = PriceFixed::new(Price::new(100, "EUR"), when);
        assert_eq!(fixed.when(), when);
        assert_eq!(fixed.price().cents(), 100);
    }

    #[test]
    fn color_display_is_argb_hex() {
        assert_eq!(Color::rgb(255, 0, 128).to_string(), "#FFFF0080");
        assert_eq!(Color::argb(0x80, 1, 2, 3).to_string(), "#80010203");
    }
}
