//! Catalog product records.
//!
//! The storefront treats a product as an opaque record keyed by its
//! identifier. Only the fields the screens read are typed; everything else
//! the feed sends is carried along in [`Product::extra`] so that persisting
//! and reloading a cart loses nothing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::id::ProductId;
use super::price::ListedPrice;

/// A product as returned by the catalog feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Listed price (string-encoded decimal in the feed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<ListedPrice>,
    /// Thumbnail image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb_img: Option<ProductImage>,
    /// Any other fields sent by the feed, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Create a product with just an identifier, name and price.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            original_price: price.map(ListedPrice::new),
            thumb_img: None,
            extra: Map::new(),
        }
    }

    /// URL of the product's thumbnail, if the feed provided one.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.thumb_img
            .as_ref()
            .and_then(|img| img.files.webp.as_deref())
    }
}

/// Nested image reference (`thumb_img` in the feed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Available encodings of the image.
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: ImageFiles,
}

/// Image files by encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFiles {
    /// WebP rendition URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webp: Option<String>,
}

/// Read an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
