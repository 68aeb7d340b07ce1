//! Lenient monetary values using decimal arithmetic.
//!
//! Prices scraped from a page arrive either as plain numbers or as
//! currency-formatted strings ("$12.99", "1,204.50 kr"). Parsing tolerates
//! both and never fails outward: anything unparsable resolves to zero, and the
//! typed error exists for diagnostics only.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced when a monetary value cannot be parsed.
///
/// Callers on the cart path never see this; they go through
/// [`Price::parse_lenient`] or [`PriceValue::to_price`], which resolve to
/// zero instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparsable monetary value {input:?}")]
pub struct PriceParseError {
    /// The raw input that failed to parse.
    pub input: String,
}

/// A unit price with exact decimal arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price, also the fallback for unparsable input.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from an exact decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Parse a currency-formatted string.
    ///
    /// Strips every character except ASCII digits, `.`, and a leading `-`
    /// before parsing, so "$12.99", "12.99 USD", and "-3.50" all work.
    ///
    /// # Errors
    ///
    /// Returns [`PriceParseError`] if nothing numeric remains after
    /// stripping, or if the remainder is not a valid decimal.
    pub fn parse(raw: &str) -> Result<Self, PriceParseError> {
        let mut cleaned = String::with_capacity(raw.len());
        for ch in raw.chars() {
            if ch.is_ascii_digit() || ch == '.' {
                cleaned.push(ch);
            } else if ch == '-' && cleaned.is_empty() {
                cleaned.push(ch);
            }
        }
        cleaned
            .parse::<Decimal>()
            .map(Self)
            .map_err(|_| PriceParseError {
                input: raw.to_owned(),
            })
    }

    /// Parse a currency-formatted string, resolving failures to zero.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        Self::parse(raw).unwrap_or(Self::ZERO)
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Line total for a given quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0 * Decimal::from(quantity)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

/// A price as it arrives at ingestion: already-numeric or formatted text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    /// A plain JSON number.
    Number(f64),
    /// A currency-formatted string, e.g. "$12.99".
    Text(String),
}

impl PriceValue {
    /// Normalize to a [`Price`], resolving unparsable input to zero.
    #[must_use]
    pub fn to_price(&self) -> Price {
        match self {
            Self::Number(n) => Decimal::try_from(*n).map(Price::new).unwrap_or(Price::ZERO),
            Self::Text(s) => Price::parse_lenient(s),
        }
    }
}

impl From<f64> for PriceValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for PriceValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for PriceValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
