//! Type-safe price representation using decimal arithmetic.
//!
//! All shop prices are in Peruvian soles and display as `S/ 113.00`.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Sub};
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price is not a number: {0}")]
    NotANumber(String),
    /// The amount is negative.
    #[error("price cannot be negative")]
    Negative,
}

/// An amount of money in soles.
///
/// Amounts may go negative through subtraction (a flat discount larger
/// than the subtotal), but [`Price::parse`] never produces one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero soles.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Display prefix for soles.
    pub const SYMBOL: &'static str = "S/";

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of soles.
    #[must_use]
    pub fn from_soles(soles: i64) -> Self {
        Self(Decimal::from(soles))
    }

    /// Create a price from céntimos (hundredths of a sol).
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Parse a price from user or catalog input.
    ///
    /// Accepts `113`, `113.50`, `S/ 113.00` and `S/. 113`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a number, or negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        let number = trimmed
            .strip_prefix(Self::SYMBOL)
            .map_or(trimmed, |rest| rest.trim_start_matches('.'))
            .trim();

        if number.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount =
            Decimal::from_str(number).map_err(|_| PriceError::NotANumber(number.to_owned()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }

        Ok(Self(amount))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Format for display (e.g., `S/ 19.90`, `-S/ 10.00`).
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self.0.round_dp(2);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{} {:.2}", Self::SYMBOL, rounded.abs())
        } else {
            format!("{} {:.2}", Self::SYMBOL, rounded.abs())
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
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
    fn test_parse_plain_number() {
        assert_eq!(Price::parse("113").unwrap(), Price::from_soles(113));
        assert_eq!(Price::parse("19.90").unwrap(), Price::from_cents(1990));
    }

    #[test]
    fn test_parse_with_symbol() {
        assert_eq!(Price::parse("S/ 113.00").unwrap(), Price::from_soles(113));
        assert_eq!(Price::parse("S/. 119").unwrap(), Price::from_soles(119));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("S/ "), Err(PriceError::Empty));
        assert!(matches!(Price::parse("abc"), Err(PriceError::NotANumber(_))));
        assert_eq!(Price::parse("-5"), Err(PriceError::Negative));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_soles(113).display(), "S/ 113.00");
        assert_eq!(Price::from_cents(1995).display(), "S/ 19.95");
        assert_eq!(Price::ZERO.display(), "S/ 0.00");
        assert_eq!(
            (Price::from_soles(5) - Price::from_soles(10)).display(),
            "-S/ 5.00"
        );
    }

    #[test]
    fn test_arithmetic() {
        let line = Price::from_soles(50).times(2);
        let total: Price = [line, Price::from_soles(30)].into_iter().sum();
        assert_eq!(total, Price::from_soles(130));
        assert_eq!(total - Price::from_soles(10), Price::from_soles(120));
    }

    #[test]
    fn test_from_cents_negative() {
        assert_eq!(Price::from_cents(-250).amount(), Decimal::new(-250, 2));
    }

    #[test]
    fn test_is_positive() {
        assert!(Price::from_cents(1).is_positive());
        assert!(!Price::ZERO.is_positive());
    }
}
