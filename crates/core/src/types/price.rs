//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices arrive as spreadsheet text; [`Price::parse`] is where that
//! text becomes a number.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::format_currency;

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input cell is empty or whitespace.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a plain decimal number.
    #[error("price is not a number: {0:?}")]
    Invalid(String),
    /// The input parsed but is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative amount in the store's base currency (ARS).
///
/// ## Accepted text
///
/// - Surrounding whitespace is ignored
/// - An optional leading `+`
/// - Digits with at most one `.` as the decimal point (`"100"`, `"99.5"`, `".5"`)
///
/// Grouping separators, currency symbols, exponents and comma decimals are
/// rejected rather than guessed at.
///
/// ## Examples
///
/// ```
/// use almacency_core::{Price, PriceError};
///
/// assert!(Price::parse("100").is_ok());
/// assert!(Price::parse(" 12.50 ").is_ok());
///
/// assert_eq!(Price::parse(""), Err(PriceError::Empty));
/// assert!(matches!(Price::parse("abc"), Err(PriceError::Invalid(_))));
/// assert!(matches!(Price::parse("-1"), Err(PriceError::Negative(_))));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Parse a price from a catalog text cell.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty after trimming
    /// - Contains anything other than an optional sign, digits and one `.`
    /// - Does not fit in a decimal
    /// - Is negative
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let unsigned = trimmed
            .strip_prefix('-')
            .or_else(|| trimmed.strip_prefix('+'))
            .unwrap_or(trimmed);
        if !is_plain_decimal(unsigned) {
            return Err(PriceError::Invalid(trimmed.to_owned()));
        }

        let digits = unsigned.trim_end_matches('.');
        let magnitude = if digits.starts_with('.') {
            Decimal::from_str(&format!("0{digits}"))
        } else {
            Decimal::from_str(digits)
        }
        .map_err(|_| PriceError::Invalid(trimmed.to_owned()))?;

        if trimmed.starts_with('-') && !magnitude.is_zero() {
            Err(PriceError::Negative(-magnitude))
        } else {
            Ok(Self(magnitude))
        }
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `true` for a price of zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the price of `quantity` units, saturating at the decimal maximum.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

/// `digits [. digits]` with at least one digit overall.
fn is_plain_decimal(s: &str) -> bool {
    let mut parts = s.splitn(2, '.');
    let integer = parts.next().unwrap_or("");
    let fraction = parts.next().unwrap_or("");

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    all_digits(integer) && all_digits(fraction) && !(integer.is_empty() && fraction.is_empty())
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_currency(self.0))
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
