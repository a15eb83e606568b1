//! Integration tests for cart persistence.
//!
//! The persisted snapshot must match the in-memory cart after every
//! successful mutation, stay untouched by failed mutations, and restore the
//! session on the next load. The file-backed tests exercise the same
//! contract through `JsonFilePersistence`.

use std::sync::Arc;

use shoebox_cart::{CartPersistence, CartStore, InMemoryPersistence, JsonFilePersistence};
use shoebox_core::ProductId;

use shoebox_integration_tests::{FakeCatalog, FakeStock, product};

fn collaborators() -> (Arc<FakeCatalog>, Arc<FakeStock>) {
    (
        Arc::new(FakeCatalog::with(vec![
            product(1, "Shoe", 10000),
            product(2, "Boot", 25000),
        ])),
        Arc::new(FakeStock::with(&[(1, 5), (2, 5)])),
    )
}

#[tokio::test]
async fn test_snapshot_matches_cart_after_each_mutation() {
    let (catalog, stock) = collaborators();
    let persistence = Arc::new(InMemoryPersistence::new());
    let mut store = CartStore::load(catalog, stock, persistence.clone())
        .await
        .expect("store loads");

    store.add_product(ProductId::new(1)).await.expect("add 1");
    let stored = persistence.load().await.expect("load").expect("present");
    assert_eq!(&stored, store.cart());

    store.add_product(ProductId::new(2)).await.expect("add 2");
    store
        .update_product_amount(ProductId::new(2), 3)
        .await
        .expect("update");
    let stored = persistence.load().await.expect("load").expect("present");
    assert_eq!(&stored, store.cart());

    store
        .remove_product(ProductId::new(1))
        .await
        .expect("remove");
    let stored = persistence.load().await.expect("load").expect("present");
    assert_eq!(&stored, store.cart());
}

#[tokio::test]
async fn test_consecutive_loads_are_equal() {
    let (catalog, stock) = collaborators();
    let persistence = Arc::new(InMemoryPersistence::new());
    let mut store = CartStore::load(catalog, stock, persistence.clone())
        .await
        .expect("store loads");
    store.add_product(ProductId::new(1)).await.expect("add");

    let first = persistence.load().await.expect("first load");
    let second = persistence.load().await.expect("second load");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_failed_mutation_leaves_snapshot_untouched() {
    let (catalog, stock) = collaborators();
    let persistence = Arc::new(InMemoryPersistence::new());
    let mut store = CartStore::load(catalog, stock.clone(), persistence.clone())
        .await
        .expect("store loads");
    store.add_product(ProductId::new(1)).await.expect("add");
    let before = persistence.load().await.expect("load");

    stock.set(ProductId::new(1), 1);
    let _ = store.update_product_amount(ProductId::new(1), 9).await;

    let after = persistence.load().await.expect("load");
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_file_persistence_restores_next_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cart.json");

    {
        let (catalog, stock) = collaborators();
        let mut store = CartStore::load(catalog, stock, JsonFilePersistence::new(&path))
            .await
            .expect("first session loads");
        store.add_product(ProductId::new(1)).await.expect("add 1");
        store.add_product(ProductId::new(1)).await.expect("merge");
        store.add_product(ProductId::new(2)).await.expect("add 2");
    }

    let (catalog, stock) = collaborators();
    let store = CartStore::load(catalog, stock, JsonFilePersistence::new(&path))
        .await
        .expect("second session loads");

    let ids: Vec<i32> = store.cart().iter().map(|item| item.id.as_i32()).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(store.cart().get(ProductId::new(1)).expect("item").amount, 2);
}

#[tokio::test]
async fn test_missing_snapshot_starts_an_empty_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (catalog, stock) = collaborators();

    let store = CartStore::load(
        catalog,
        stock,
        JsonFilePersistence::new(dir.path().join("cart.json")),
    )
    .await
    .expect("store loads");

    assert!(store.cart().is_empty());
}
