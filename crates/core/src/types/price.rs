//! Catalog prices and cart totals using decimal arithmetic.
//!
//! The catalog feed encodes prices as strings (`"1299.00"`). They are kept in
//! that raw form on the [`Product`](crate::Product) so a persisted cart
//! snapshot reproduces the feed exactly, and only parsed when a total is
//! computed.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};

/// A price exactly as listed by the catalog.
///
/// Accepts either a JSON string or a JSON number on input; always serializes
/// as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ListedPrice(String);

impl ListedPrice {
    /// Create a listed price from its raw text.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw price text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the listed price as a decimal amount.
    ///
    /// Surrounding whitespace is ignored. Returns `None` for anything that is
    /// not a plain or scientific-notation decimal: no leading-number prefix is
    /// taken, so `"1,299.00"` and `"12abc"` are both `None`.
    #[must_use]
    pub fn amount(&self) -> Option<Decimal> {
        let raw = self.0.trim();
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .ok()
    }
}

impl fmt::Display for ListedPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ListedPrice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(number) => Self(number.to_string()),
        })
    }
}

/// Sum of the prices in a cart.
///
/// A single missing or unparseable price poisons the whole sum: the total
/// becomes [`CartTotal::NotANumber`] and stays there.
///
/// # Example
///
/// ```rust
/// # use shopfront_core::{CartTotal, ListedPrice};
/// let a = ListedPrice::new("10.50");
/// let b = ListedPrice::new("5.25");
///
/// let total = CartTotal::sum([Some(&a), Some(&b)]);
/// assert_eq!(total.to_string(), "15.75");
///
/// let poisoned = CartTotal::sum([Some(&a), None]);
/// assert!(poisoned.is_nan());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartTotal {
    /// Exact decimal total.
    Amount(Decimal),
    /// At least one price could not be parsed.
    NotANumber,
}

impl CartTotal {
    /// Total of an empty cart.
    pub const ZERO: Self = Self::Amount(Decimal::ZERO);

    /// Add one price to the running total.
    #[must_use]
    pub fn accumulate(self, price: Option<&ListedPrice>) -> Self {
        let Self::Amount(total) = self else {
            return Self::NotANumber;
        };

        price
            .and_then(ListedPrice::amount)
            .and_then(|amount| total.checked_add(amount))
            .map_or(Self::NotANumber, Self::Amount)
    }

    /// Sum a sequence of prices, starting from zero.
    #[must_use]
    pub fn sum<'a, I>(prices: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a ListedPrice>>,
    {
        prices.into_iter().fold(Self::ZERO, Self::accumulate)
    }

    /// Returns the decimal amount, or `None` if the total is poisoned.
    #[must_use]
    pub const fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Amount(amount) => Some(*amount),
            Self::NotANumber => None,
        }
    }

    /// Whether a price in the cart could not be parsed.
    #[must_use]
    pub const fn is_nan(&self) -> bool {
        matches!(self, Self::NotANumber)
    }
}

impl Default for CartTotal {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Formats with two decimal places (`"15.75"`), or `"NaN"`.
impl fmt::Display for CartTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(amount) => {
                let rounded =
                    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                write!(f, "{rounded:.2}")
            }
            Self::NotANumber => f.write_str("NaN"),
        }
    }
}
