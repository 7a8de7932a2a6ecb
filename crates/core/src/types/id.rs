//! Product identifiers as they appear in the remote catalog.
//!
//! The catalog feed sends identifiers as JSON integers, but other feeds (and
//! older persisted snapshots) may carry strings. [`ProductId`] keeps whichever
//! representation it was given so a snapshot round-trips byte-for-byte.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog product.
///
/// Equality is strict: `ProductId::Numeric(1)` and `ProductId::Text("1")`
/// are different identifiers.
///
/// # Example
///
/// ```rust
/// # use shopfront_core::ProductId;
/// let numeric: ProductId = serde_json::from_str("42").unwrap();
/// let text: ProductId = serde_json::from_str("\"42\"").unwrap();
///
/// assert_eq!(numeric, ProductId::from(42));
/// assert_ne!(numeric, text);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Integer identifier (the catalog feed's native form).
    Numeric(i64),
    /// String identifier.
    Text(String),
}

impl ProductId {
    /// Get the identifier as an integer, if it is numeric.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Numeric(id) => Some(*id),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}
