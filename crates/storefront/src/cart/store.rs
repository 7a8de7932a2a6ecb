//! Cart store: state transitions plus the durable mirror.

use std::sync::Arc;

use shopfront_core::{CartTotal, Product, ProductId};
use tracing::{debug, instrument, warn};

use super::snapshot;
use super::state::{CartChange, CartState};
use super::writer::SnapshotWriter;
use crate::storage::{KeyValueStore, keys};

/// Authoritative in-memory cart, mirrored to durable storage after every
/// mutation.
///
/// Mutations never fail from the caller's point of view: the snapshot is
/// handed to a background [`SnapshotWriter`] and persistence errors are only
/// logged. The in-memory state is never rolled back.
#[derive(Debug)]
pub struct CartStore {
    state: CartState,
    writer: SnapshotWriter,
}

impl CartStore {
    /// Create an empty cart persisting to `store`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new<S: KeyValueStore>(store: Arc<S>) -> Self {
        Self {
            state: CartState::new(),
            writer: SnapshotWriter::spawn(store, keys::CART),
        }
    }

    /// Create a cart and replace it with the last persisted snapshot.
    pub async fn load<S: KeyValueStore>(store: Arc<S>) -> Self {
        let mut cart = Self::new(Arc::clone(&store));
        cart.hydrate(store.as_ref()).await;
        cart
    }

    /// Read the durable slot and [`initialize`](Self::initialize) from it.
    ///
    /// A failed read, a missing value and a malformed value all leave the
    /// cart empty.
    #[instrument(skip_all)]
    pub async fn hydrate<S: KeyValueStore>(&mut self, store: &S) {
        let raw = match store.get(keys::CART).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to read cart snapshot, starting empty");
                None
            }
        };

        self.initialize(snapshot::decode(raw.as_deref()));
        debug!(items = self.state.len(), "Cart hydrated");
    }

    /// Replace the collection with `snapshot`, or empty it when `None`.
    ///
    /// Does not write back to storage.
    pub fn initialize(&mut self, snapshot: Option<Vec<Product>>) {
        self.state.initialize(snapshot);
    }

    /// Append a product (no duplicate check) and persist.
    pub fn add(&mut self, product: Product) {
        self.state.add(product);
        self.persist();
    }

    /// Remove every entry with `product_id` and persist, even if nothing
    /// matched.
    pub fn remove(&mut self, product_id: &ProductId) {
        let removed = self.state.remove(product_id);
        debug!(%product_id, removed, "Removed from cart");
        self.persist();
    }

    /// Remove the product if present, otherwise add it; persist either way.
    pub fn toggle(&mut self, product: Product) -> CartChange {
        let product_id = product.id.clone();
        let change = self.state.toggle(product);
        debug!(%product_id, ?change, "Toggled cart entry");
        self.persist();
        change
    }

    /// Whether any entry has the identifier `product_id`.
    #[must_use]
    pub fn is_present(&self, product_id: &ProductId) -> bool {
        self.state.is_present(product_id)
    }

    /// Sum of the listed prices.
    #[must_use]
    pub fn total_price(&self) -> CartTotal {
        self.state.total_price()
    }

    /// Current state (read-only).
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        self.state.items()
    }

    /// Wait for every queued snapshot to reach storage.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    fn persist(&self) {
        match snapshot::encode(self.state.items()) {
            Ok(raw) => self.writer.enqueue(raw),
            Err(e) => warn!(error = %e, "Failed to serialize cart snapshot"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::storage::{MemoryStore, StorageError};

    /// Store that fails every operation.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::InvalidKey("broken".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey("broken".to_string()))
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey("broken".to_string()))
        }
    }

    fn product(id: i64, price: &str) -> Product {
        Product::new(id, format!("Product {id}"), Some(price))
    }

    async fn stored(store: &MemoryStore) -> Option<Vec<Product>> {
        snapshot::decode(store.get(keys::CART).await.unwrap().as_deref())
    }

    #[tokio::test]
    async fn every_mutation_writes_full_snapshot() {
        let store = Arc::new(MemoryStore::new());
        let mut cart = CartStore::new(Arc::clone(&store));

        cart.add(product(1, "20"));
        cart.add(product(2, "30"));
        cart.flush().await;
        assert_eq!(stored(&store).await.unwrap().len(), 2);

        cart.remove(&ProductId::from(1));
        cart.flush().await;
        assert_eq!(stored(&store).await.unwrap(), vec![product(2, "30")]);
        assert_eq!(cart.total_price(), CartTotal::Amount(Decimal::new(30, 0)));
    }

    #[tokio::test]
    async fn removing_absent_id_still_writes() {
        let store = Arc::new(MemoryStore::new());
        let mut cart = CartStore::new(Arc::clone(&store));

        cart.remove(&ProductId::from(404));
        cart.flush().await;

        assert_eq!(stored(&store).await, Some(Vec::new()));
    }

    #[tokio::test]
    async fn round_trip_through_storage() {
        let store = Arc::new(MemoryStore::new());
        let item = product(7, "12.00");

        let mut cart = CartStore::new(Arc::clone(&store));
        cart.add(item.clone());
        cart.flush().await;
        drop(cart);

        let reloaded = CartStore::load(Arc::clone(&store)).await;
        assert_eq!(reloaded.items(), &[item]);
        assert!(reloaded.is_present(&ProductId::from(7)));
    }

    #[tokio::test]
    async fn hydrate_tolerates_malformed_snapshot() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::CART, "{not json").await.unwrap();

        let cart = CartStore::load(Arc::clone(&store)).await;

        assert!(cart.state().is_empty());
    }

    #[tokio::test]
    async fn hydrate_tolerates_null_snapshot() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::CART, "null").await.unwrap();

        let cart = CartStore::load(store).await;

        assert!(cart.state().is_empty());
    }

    #[tokio::test]
    async fn initialize_does_not_write_back() {
        let store = Arc::new(MemoryStore::new());
        let mut cart = CartStore::new(Arc::clone(&store));

        cart.initialize(Some(vec![product(1, "1")]));
        cart.flush().await;

        assert!(store.get(keys::CART).await.unwrap().is_none());
        assert_eq!(cart.items().len(), 1);
    }

    #[tokio::test]
    async fn storage_failures_are_not_surfaced() {
        let mut cart = CartStore::load(Arc::new(BrokenStore)).await;
        assert!(cart.state().is_empty());

        assert_eq!(cart.toggle(product(1, "5")), CartChange::Added);
        cart.add(product(2, "5"));
        cart.remove(&ProductId::from(2));
        cart.flush().await;

        assert!(cart.is_present(&ProductId::from(1)));
        assert_eq!(cart.items().len(), 1);
    }

    #[tokio::test]
    async fn rapid_toggles_leave_latest_state_on_disk() {
        let store = Arc::new(MemoryStore::new());
        let mut cart = CartStore::new(Arc::clone(&store));

        for round in 0..25 {
            cart.toggle(product(round % 3, "1"));
        }
        cart.flush().await;

        assert_eq!(stored(&store).await.unwrap(), cart.items());
    }
}
