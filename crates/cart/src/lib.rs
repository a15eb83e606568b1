//! Shoebox Cart - cart session store.
//!
//! # Architecture
//!
//! One component, [`CartStore`], owns the in-memory cart for a session and
//! keeps it synchronized with a durable key-value persistence collaborator.
//! Before any quantity change it consults the remote product catalog and
//! stock service, fetched fresh every time - stale availability is never
//! trusted.
//!
//! Collaborators are traits with shipped implementations:
//!
//! - [`ProductCatalog`] / [`StockService`] - implemented by [`ApiClient`]
//!   against the store's REST API
//! - [`CartPersistence`] - implemented by [`JsonFilePersistence`] (a JSON
//!   key-value file) and [`InMemoryPersistence`]
//! - [`Notifier`] - optional fire-and-forget sink for failure messages,
//!   implemented by [`TracingNotifier`] and, for tests,
//!   [`RecordingNotifier`]
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shoebox_cart::{ApiClient, CartConfig, CartStore, JsonFilePersistence, TracingNotifier};
//! use shoebox_core::ProductId;
//!
//! let config = CartConfig::from_env()?;
//! let api = ApiClient::new(&config)?;
//! let persistence = JsonFilePersistence::new(&config.cart_path);
//!
//! let mut store = CartStore::load(api.clone(), api, persistence)
//!     .await?
//!     .with_notifier(Arc::new(TracingNotifier));
//!
//! store.add_product(ProductId::new(1)).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod persistence;
pub mod store;

pub use api::{ApiClient, ApiError, ProductCatalog, StockService};
pub use config::{CartConfig, ConfigError};
pub use error::{CartError, Failure};
pub use notify::{Notifier, RecordingNotifier, TracingNotifier};
pub use persistence::{
    CART_STORAGE_KEY, CartPersistence, InMemoryPersistence, JsonFilePersistence, PersistenceError,
};
pub use store::CartStore;
