//! Cart state container and its persistence contract.
//!
//! # Architecture
//!
//! - [`CartState`] - pure transitions (initialize, add, remove, toggle, total)
//! - [`SnapshotWriter`] - background single-writer queue to durable storage
//! - [`CartStore`] - orchestration: apply the transition, then enqueue the
//!   full post-mutation snapshot
//!
//! # Lifecycle
//!
//! The cart starts empty, is replaced once by the persisted snapshot
//! ([`CartStore::hydrate`]), and is then mutated only through
//! add/remove/toggle. Every mutation rewrites the whole snapshot under the
//! `cart` key.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use shopfront_core::Product;
//! use shopfront_storefront::cart::CartStore;
//! use shopfront_storefront::storage::FileStore;
//!
//! # async fn demo() {
//! let store = Arc::new(FileStore::new(".shopfront"));
//! let mut cart = CartStore::load(store).await;
//!
//! cart.toggle(Product::new(1, "Laptop", Some("1299.00")));
//! println!("Total Price: {}", cart.total_price());
//!
//! cart.flush().await;
//! # }
//! ```

pub mod snapshot;
mod state;
mod store;
mod writer;

pub use state::{CartChange, CartState};
pub use store::CartStore;
pub use writer::SnapshotWriter;
