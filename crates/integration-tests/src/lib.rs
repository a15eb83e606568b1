//! Integration tests for Shoebox.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shoebox-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_add` - add-product scenarios, including merge-on-add
//! - `cart_update` - quantity updates against stock
//! - `cart_remove` - removal semantics
//! - `cart_persistence` - snapshot idempotence and session restore
//!
//! This crate also provides the shared test doubles: [`FakeCatalog`],
//! [`FakeStock`], and [`FailingPersistence`] are mutable-behind-`Arc`
//! collaborator fakes, so a test can change catalog contents, stock
//! amounts, or storage health while a store holds the other handle.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicBool, Ordering};

use rust_decimal::Decimal;

use shoebox_cart::{
    ApiError, CartPersistence, InMemoryPersistence, PersistenceError, ProductCatalog,
    StockService,
};
use shoebox_core::{Cart, Price, Product, ProductId, StockEntry};

/// Build a catalog product for tests. `price_cents` is in hundredths.
#[must_use]
pub fn product(id: i32, title: &str, price_cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Price::new(Decimal::new(price_cents, 2)),
        image_url: format!("https://cdn.example.com/{id}.jpg"),
    }
}

/// In-memory product catalog whose contents can change mid-test.
#[derive(Default)]
pub struct FakeCatalog {
    products: Mutex<HashMap<i32, Product>>,
    failing: AtomicBool,
}

impl FakeCatalog {
    /// Create a catalog with the given products.
    #[must_use]
    pub fn with(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(
                products.into_iter().map(|p| (p.id.as_i32(), p)).collect(),
            ),
            failing: AtomicBool::new(false),
        }
    }

    /// Drop a product from the catalog.
    pub fn remove(&self, id: ProductId) {
        self.products
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id.as_i32());
    }

    /// Make every lookup fail with a transport-level error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl ProductCatalog for FakeCatalog {
    async fn get(&self, id: ProductId) -> Result<Option<Product>, ApiError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApiError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(self
            .products
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id.as_i32())
            .cloned())
    }
}

/// In-memory stock service whose amounts can change mid-test.
#[derive(Default)]
pub struct FakeStock {
    amounts: Mutex<HashMap<i32, u32>>,
    failing: AtomicBool,
}

impl FakeStock {
    /// Create a stock service with the given availability.
    #[must_use]
    pub fn with(amounts: &[(i32, u32)]) -> Self {
        Self {
            amounts: Mutex::new(amounts.iter().copied().collect()),
            failing: AtomicBool::new(false),
        }
    }

    /// Replace the availability for a product.
    pub fn set(&self, id: ProductId, amount: u32) {
        self.amounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.as_i32(), amount);
    }

    /// Make every lookup fail with a transport-level error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl StockService for FakeStock {
    async fn get(&self, id: ProductId) -> Result<StockEntry, ApiError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApiError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        }
        self.amounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id.as_i32())
            .map(|&amount| StockEntry { id, amount })
            .ok_or_else(|| ApiError::NotFound(format!("stock {id}")))
    }
}

/// Persistence whose writes can be made to fail mid-test.
///
/// Loads always succeed against the wrapped in-memory store, so a session
/// can be seeded before the outage starts.
#[derive(Default)]
pub struct FailingPersistence {
    inner: InMemoryPersistence,
    failing: AtomicBool,
}

impl FailingPersistence {
    /// Create a working store; writes fail only after `set_failing(true)`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every save fail with an I/O error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl CartPersistence for FailingPersistence {
    async fn load(&self) -> Result<Option<Cart>, PersistenceError> {
        self.inner.load().await
    }

    async fn save(&self, cart: &Cart) -> Result<(), PersistenceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PersistenceError::Io(std::io::Error::other(
                "backing store unavailable",
            )));
        }
        self.inner.save(cart).await
    }
}
