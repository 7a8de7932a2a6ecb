//! Catalog screen.

use shopfront_core::{Product, ProductId};
use tracing::{error, info};

use crate::cart::CartState;
use crate::services::catalog::CatalogClient;

/// Product card display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub price_label: String,
    pub image_url: Option<String>,
    pub in_cart: bool,
}

/// Product list shown on the catalog screen.
#[derive(Debug, Clone, Default)]
pub struct CatalogScreen {
    products: Vec<Product>,
}

impl CatalogScreen {
    /// Create a screen with no products.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the catalog.
    ///
    /// Any failure is logged and leaves the current list untouched.
    pub async fn load(&mut self, client: &CatalogClient) {
        match client.fetch_products().await {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                self.products = products;
            }
            Err(e) => {
                error!(error = %e, "Error fetching catalog");
            }
        }
    }

    /// Products in feed order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a listed product.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Build the cards to render, marking products already in the cart.
    #[must_use]
    pub fn cards(&self, cart: &CartState) -> Vec<ProductCard> {
        self.products
            .iter()
            .map(|product| ProductCard {
                id: product.id.clone(),
                name: product.name.clone(),
                price_label: price_label(product),
                image_url: product.image_url().map(str::to_string),
                in_cart: cart.is_present(&product.id),
            })
            .collect()
    }
}

/// `"Price: <listed price>"`, with an empty price when the feed has none.
pub(crate) fn price_label(product: &Product) -> String {
    format!(
        "Price: {}",
        product
            .original_price
            .as_ref()
            .map_or("", |price| price.as_str())
    )
}
