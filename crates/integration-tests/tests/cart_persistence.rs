//! Integration tests for cart persistence across restarts.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use shopfront_core::{CartTotal, Product, ProductId};
use shopfront_storefront::cart::{CartChange, CartStore};
use shopfront_storefront::storage::{FileStore, KeyValueStore, keys};

fn product(id: i64, price: &str) -> Product {
    Product::new(id, format!("Product {id}"), Some(price))
}

#[tokio::test]
async fn test_cart_reloads_after_restart() {
    let tmp = tempfile::tempdir().unwrap();

    let store = Arc::new(FileStore::new(tmp.path()));
    let mut cart = CartStore::load(Arc::clone(&store)).await;
    cart.add(product(1, "10.50"));
    cart.add(product(2, "4.25"));
    cart.flush().await;
    drop(cart);

    let store = Arc::new(FileStore::new(tmp.path()));
    let cart = CartStore::load(store).await;

    assert_eq!(cart.items(), [product(1, "10.50"), product(2, "4.25")]);
    assert_eq!(cart.total_price().to_string(), "14.75");
}

#[tokio::test]
async fn test_snapshot_keeps_unknown_fields() {
    let tmp = tempfile::tempdir().unwrap();
    let raw = r#"[{"id":"sku-1","name":"Lamp","original_price":"30","color":"red"}]"#;
    let store = Arc::new(FileStore::new(tmp.path()));
    store.set(keys::CART, raw).await.unwrap();

    let mut cart = CartStore::load(Arc::clone(&store)).await;
    cart.add(product(2, "5"));
    cart.flush().await;

    let saved = store.get(keys::CART).await.unwrap().unwrap();
    let saved: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved[0]["color"], "red");
    assert_eq!(saved[0]["id"], "sku-1");
    assert_eq!(saved[1]["id"], 2);
}

#[tokio::test]
async fn test_corrupt_snapshot_starts_empty() {
    let tmp = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(tmp.path()));
    store.set(keys::CART, "{not json").await.unwrap();

    let mut cart = CartStore::load(Arc::clone(&store)).await;
    assert!(cart.items().is_empty());

    cart.add(product(1, "1.00"));
    cart.flush().await;

    let cart = CartStore::load(store).await;
    assert_eq!(cart.items(), [product(1, "1.00")]);
}

#[tokio::test]
async fn test_last_write_wins_after_rapid_toggles() {
    let tmp = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(tmp.path()));
    let mut cart = CartStore::load(Arc::clone(&store)).await;

    for _ in 0..25 {
        assert_eq!(cart.toggle(product(1, "2.00")), CartChange::Added);
        assert_eq!(cart.toggle(product(1, "2.00")), CartChange::Removed);
    }
    cart.toggle(product(7, "3.00"));
    cart.flush().await;

    let reloaded = CartStore::load(store).await;
    assert_eq!(reloaded.items(), [product(7, "3.00")]);
}

#[tokio::test]
async fn test_duplicate_adds_survive_restart() {
    let tmp = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(tmp.path()));
    let mut cart = CartStore::load(Arc::clone(&store)).await;

    cart.add(product(3, "1.10"));
    cart.add(product(3, "1.10"));
    cart.flush().await;

    let mut reloaded = CartStore::load(Arc::clone(&store)).await;
    assert_eq!(reloaded.items().len(), 2);
    assert_eq!(reloaded.total_price().to_string(), "2.20");

    reloaded.remove(&ProductId::from(3));
    assert!(reloaded.items().is_empty());
    assert_eq!(reloaded.total_price(), CartTotal::ZERO);
}
