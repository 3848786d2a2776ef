//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are always strictly positive and denominated in dollars. They
//! persist as plain JSON numbers (`5.99`), not strings, so only amounts an
//! `f64` carries exactly are accepted.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a number.
    #[error("price must be a number")]
    NotNumeric,
    /// The amount is zero or negative.
    #[error("price must be greater than zero")]
    NotPositive,
    /// The amount exceeds [`Price::MAX`].
    #[error("price must be at most {}", Price::MAX)]
    TooLarge,
    /// The amount has more precision than a stored price keeps.
    #[error("price has too many decimal places")]
    TooPrecise,
}

/// A strictly positive price in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Largest accepted price.
    pub const MAX: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NotPositive` if the amount is zero or negative,
    /// `PriceError::TooLarge` above [`Price::MAX`], and
    /// `PriceError::TooPrecise` if the amount would not read back unchanged
    /// from its stored form.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }
        if amount > Self::MAX {
            return Err(PriceError::TooLarge);
        }
        if !survives_float(amount) {
            return Err(PriceError::TooPrecise);
        }
        Ok(Self(amount))
    }

    /// Create a price from an integer number of cents.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NotPositive` if `cents` is zero or negative, or
    /// `PriceError::TooLarge` above [`Price::MAX`].
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// Parse a price from user input such as `"3.99"`.
    ///
    /// Surrounding whitespace is ignored. Scientific notation (`"1e2"`) is
    /// accepted the same way a numeric form field would accept it.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the input is empty or not a number, or if
    /// the amount fails [`Price::new`].
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PriceError::Empty);
        }
        // Digit separators are not part of a form number.
        if s.contains('_') {
            return Err(PriceError::NotNumeric);
        }

        let amount = Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map_err(|_| PriceError::NotNumeric)?;
        Self::new(amount)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display (e.g., "$5.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

/// Whether `amount` comes back equal after the `f64` trip it takes through
/// persisted JSON.
fn survives_float(amount: Decimal) -> bool {
    amount
        .to_f64()
        .and_then(|float| Decimal::from_str(&float.to_string()).ok())
        .is_some_and(|back| back == amount)
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Price::parse("3.99").unwrap().amount(), Decimal::new(399, 2));
        assert_eq!(Price::parse(" 12 ").unwrap().amount(), Decimal::new(12, 0));
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("   "), Err(PriceError::Empty));
        assert_eq!(Price::parse("abc"), Err(PriceError::NotNumeric));
        assert_eq!(Price::parse("0"), Err(PriceError::NotPositive));
        assert_eq!(Price::parse("-1.50"), Err(PriceError::NotPositive));
    }

    #[test]
    fn test_parse_rejects_digit_separators() {
        assert_eq!(Price::parse("1_000"), Err(PriceError::NotNumeric));
        assert_eq!(Price::parse("4_.50"), Err(PriceError::NotNumeric));
    }

    #[test]
    fn test_rejects_amounts_that_do_not_persist() {
        assert_eq!(
            Price::parse("79228162514264337593543950335"),
            Err(PriceError::TooLarge)
        );
        assert_eq!(Price::parse("1000000000.01"), Err(PriceError::TooLarge));
        assert_eq!(
            Price::parse("0.123456789012345678"),
            Err(PriceError::TooPrecise)
        );
        assert!(Price::parse("1000000000").is_ok());
    }

    #[test]
    fn test_accepted_prices_read_back_equal() {
        for input in ["0.01", "3.49", "6.50", "12.99", "999999.99", "0.125"] {
            let price = Price::parse(input).unwrap();
            let json = serde_json::to_string(&price).unwrap();
            let back: Price = serde_json::from_str(&json).unwrap();
            assert_eq!(back, price, "{input}");
        }
    }

    #[test]
    fn test_display() {
        let price = Price::from_cents(599).unwrap();
        assert_eq!(price.display(), "$5.99");
        assert_eq!(price.to_string(), "5.99");
        assert_eq!(Price::from_cents(650).unwrap().display(), "$6.50");
    }

    #[test]
    fn test_serializes_as_number() {
        let price = Price::from_cents(349).unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "3.49");

        let parsed: Price = serde_json::from_str("3.49").unwrap();
        assert_eq!(parsed, price);
    }

    #[test]
    fn test_deserialize_rejects_non_positive() {
        assert!(serde_json::from_str::<Price>("0").is_err());
        assert!(serde_json::from_str::<Price>("-2.5").is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(Price::from_cents(299).unwrap() < Price::from_cents(349).unwrap());
    }
}
