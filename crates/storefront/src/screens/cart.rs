//! Cart screen view model.

use shopfront_core::ProductId;

use super::catalog::price_label;
use crate::cart::CartState;

/// Cart item display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: ProductId,
    pub name: String,
    pub price_label: String,
    pub image_url: Option<String>,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub title: &'static str,
    pub items: Vec<CartItemView>,
    pub total_label: String,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&CartState::new())
    }
}

impl From<&CartState> for CartView {
    fn from(cart: &CartState) -> Self {
        Self {
            title: "My Cart",
            items: cart
                .items()
                .iter()
                .map(|product| CartItemView {
                    id: product.id.clone(),
                    name: product.name.clone(),
                    price_label: price_label(product),
                    image_url: product.image_url().map(str::to_string),
                })
                .collect(),
            total_label: format!("Total Price: {}", cart.total_price()),
        }
    }
}

#[cfg(test)]
mod tests {
    use shopfront_core::Product;

    use super::*;

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::empty();
        assert_eq!(view.title, "My Cart");
        assert!(view.items.is_empty());
        assert_eq!(view.total_label, "Total Price: 0.00");
    }

    #[test]
    fn test_view_lists_items_in_order() {
        let mut cart = CartState::new();
        cart.add(Product::new(2, "Dock", Some("30")));
        cart.add(Product::new(1, "Cable", Some("20")));

        let view = CartView::from(&cart);

        let names: Vec<_> = view.items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Dock", "Cable"]);
        assert_eq!(view.items[0].price_label, "Price: 30");
        assert_eq!(view.total_label, "Total Price: 50.00");
    }

    #[test]
    fn test_view_shows_nan_total() {
        let mut cart = CartState::new();
        cart.add(Product::new(1, "Cable", Some("20")));
        cart.add(Product::new(2, "Mystery", Some("ask")));

        assert_eq!(CartView::from(&cart).total_label, "Total Price: NaN");
    }
}
