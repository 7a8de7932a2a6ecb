//! Pure cart state transitions.
//!
//! Nothing in this module performs I/O. [`CartStore`](super::CartStore)
//! calls these transitions and then schedules the durable write.

use shopfront_core::{CartTotal, Product, ProductId};

/// What a [`CartState::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// The product was not in the cart and was appended.
    Added,
    /// Every entry with the product's identifier was removed.
    Removed,
}

/// Ordered collection of the products in the cart.
///
/// Insertion order is display order. There is no quantity: a product is
/// either present or not. [`add`](Self::add) does not check for an existing
/// entry, so calling it twice with the same product leaves two entries;
/// [`toggle`](Self::toggle) never does.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    items: Vec<Product>,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Replace the whole collection with a persisted snapshot.
    ///
    /// `None` (no snapshot, or one that could not be decoded) resets the
    /// cart to empty.
    pub fn initialize(&mut self, snapshot: Option<Vec<Product>>) {
        self.items = snapshot.unwrap_or_default();
    }

    /// Append a product.
    pub fn add(&mut self, product: Product) {
        self.items.push(product);
    }

    /// Remove every entry whose identifier equals `product_id`.
    ///
    /// Returns how many entries were removed.
    pub fn remove(&mut self, product_id: &ProductId) -> usize {
        let before = self.items.len();
        self.items.retain(|product| &product.id != product_id);
        before - self.items.len()
    }

    /// Whether any entry has the identifier `product_id`.
    #[must_use]
    pub fn is_present(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|product| &product.id == product_id)
    }

    /// Remove the product if present, otherwise add it.
    pub fn toggle(&mut self, product: Product) -> CartChange {
        if self.is_present(&product.id) {
            self.remove(&product.id);
            CartChange::Removed
        } else {
            self.add(product);
            CartChange::Added
        }
    }

    /// Sum of the listed prices of every entry.
    ///
    /// An entry with a missing or unparseable price makes the total
    /// [`CartTotal::NotANumber`].
    #[must_use]
    pub fn total_price(&self) -> CartTotal {
        CartTotal::sum(self.items.iter().map(|p| p.original_price.as_ref()))
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Number of entries (duplicates counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
