//! Amount type for budget values
//!
//! Wraps `rust_decimal::Decimal` so sums and the Pareto threshold are exact.
//! Budget amounts are never negative: construction clamps negatives to zero
//! and lenient parsing of source text turns anything unusable into zero.
//! Sums saturate instead of overflowing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

/// Largest amount accepted from a single source cell (10^20)
pub fn max_cell_amount() -> Decimal {
    Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0)
}

/// A budget amount in whole currency units (may carry decimals)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "StoredDecimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Create an amount from a decimal value, clamping negatives to zero
    pub fn new(value: Decimal) -> Self {
        Self(value.max(Decimal::ZERO))
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal value
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Multiply by a plain decimal factor (e.g. a threshold fraction)
    pub fn scale(&self, factor: Decimal) -> Self {
        match self.0.checked_mul(factor) {
            Some(value) => Self::new(value),
            None => Self(Decimal::MAX),
        }
    }

    /// Share of `total` represented by this amount, as a fraction in [0, 1]
    pub fn share_of(&self, total: Amount) -> Decimal {
        if total.is_zero() {
            Decimal::ZERO
        } else {
            self.0.checked_div(total.0).unwrap_or(Decimal::ZERO)
        }
    }

    /// Parse a budget amount from source text
    ///
    /// Accepts the operational spreadsheet format: an optional `$` (or the
    /// given currency symbol), `.` as thousands separator and `,` as decimal
    /// separator. `"$1.234.567"` parses as 1234567 and `"45,5"` as 45.5.
    /// Values above [`max_cell_amount`] are rejected.
    pub fn parse(s: &str, currency_symbol: &str) -> Result<Self, AmountParseError> {
        let mut cleaned = s.trim().replace('$', "");
        if !currency_symbol.is_empty() {
            cleaned = cleaned.replace(currency_symbol, "");
        }
        let cleaned = cleaned.replace('.', "").replace(',', ".");
        let cleaned = cleaned.trim();

        if cleaned.is_empty() {
            return Err(AmountParseError::Empty);
        }

        let value = Decimal::from_str(cleaned)
            .map_err(|_| AmountParseError::InvalidFormat(s.trim().to_string()))?;

        if value < Decimal::ZERO {
            return Err(AmountParseError::Negative(s.trim().to_string()));
        }
        if value > max_cell_amount() {
            return Err(AmountParseError::TooLarge(s.trim().to_string()));
        }

        Ok(Self(value))
    }

    /// Parse a budget amount, falling back to zero on any failure
    pub fn parse_lenient(s: &str, currency_symbol: &str) -> Self {
        Self::parse(s, currency_symbol).unwrap_or_default()
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Deserialization source for [`Amount`]
#[derive(Deserialize)]
#[serde(transparent)]
struct StoredDecimal(Decimal);

/// Stored amounts must already satisfy the invariant
impl TryFrom<StoredDecimal> for Amount {
    type Error = AmountParseError;

    fn try_from(StoredDecimal(value): StoredDecimal) -> Result<Self, Self::Error> {
        if value < Decimal::ZERO {
            Err(AmountParseError::Negative(value.to_string()))
        } else {
            Ok(Self(value))
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.checked_add(other.0).unwrap_or(Decimal::MAX))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Saturates at zero
impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.0 - other.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

impl<'a> std::iter::Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + *a)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    Empty,
    InvalidFormat(String),
    Negative(String),
    TooLarge(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::Empty => write!(f, "Empty amount"),
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
            AmountParseError::Negative(s) => write!(f, "Negative amount: {}", s),
            AmountParseError::TooLarge(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}
