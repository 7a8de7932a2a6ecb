//! Cart snapshot encoding.
//!
//! A snapshot is the JSON array of product records, stored whole under
//! [`keys::CART`](crate::storage::keys::CART). There is no schema version.

use shopfront_core::Product;
use tracing::warn;

/// Serialize the full cart collection.
///
/// # Errors
///
/// Returns an error if a product's extra fields cannot be serialized.
pub fn encode(items: &[Product]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Decode a stored snapshot.
///
/// Returns `None` when nothing is stored, when the stored value is JSON
/// `null`, and when it is not an array of product records. Malformed data
/// is logged and otherwise ignored.
#[must_use]
pub fn decode(raw: Option<&str>) -> Option<Vec<Product>> {
    let raw = raw?;

    match serde_json::from_str::<Option<Vec<Product>>>(raw) {
        Ok(items) => items,
        Err(e) => {
            warn!(
                error = %e,
                bytes = raw.len(),
                "Discarding malformed cart snapshot"
            );
            None
        }
    }
}
