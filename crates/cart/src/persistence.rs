//! Durable cart persistence.
//!
//! Persistence is a string key-value collaborator: the whole cart is
//! serialized to one string and written under the fixed
//! [`CART_STORAGE_KEY`] namespace. `save` fully overwrites the prior value;
//! there is no partial update. Writes are awaited but not fsynced, so a
//! crash between a mutation and its write loses that mutation only.
//!
//! Two implementations ship here: [`JsonFilePersistence`] keeps the
//! key-value map in a JSON file on disk, [`InMemoryPersistence`] keeps it in
//! a mutex-guarded map for tests and embedding.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use shoebox_core::Cart;

/// Namespace key under which the cart snapshot is stored.
pub const CART_STORAGE_KEY: &str = "@shoebox:cart";

/// Errors that can occur while loading or saving the cart snapshot.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the backing store failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cart could not be serialized or the stored value is not valid
    /// JSON.
    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable key-value persistence for the cart, get/set string semantics.
#[allow(async_fn_in_trait)]
pub trait CartPersistence {
    /// Load the stored cart, `None` when nothing has been stored yet.
    async fn load(&self) -> Result<Option<Cart>, PersistenceError>;

    /// Overwrite the stored cart with `cart`.
    async fn save(&self, cart: &Cart) -> Result<(), PersistenceError>;
}

/// A store and its owner can share one persistence through an `Arc`.
impl<P: CartPersistence> CartPersistence for std::sync::Arc<P> {
    async fn load(&self) -> Result<Option<Cart>, PersistenceError> {
        (**self).load().await
    }

    async fn save(&self, cart: &Cart) -> Result<(), PersistenceError> {
        (**self).save(cart).await
    }
}

// =============================================================================
// JsonFilePersistence
// =============================================================================

/// File-backed persistence: a JSON object file mapping namespace keys to
/// serialized values.
///
/// A missing file reads as an empty store. Saving creates the file on first
/// write and rewrites it whole on every subsequent write.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    /// Create a persistence backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_entries(&self) -> Result<HashMap<String, String>, PersistenceError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(PersistenceError::Io(e)),
        }
    }
}

impl CartPersistence for JsonFilePersistence {
    async fn load(&self) -> Result<Option<Cart>, PersistenceError> {
        let entries = self.read_entries().await?;
        match entries.get(CART_STORAGE_KEY) {
            Some(stored) => Ok(Some(serde_json::from_str(stored)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), PersistenceError> {
        let mut entries = self.read_entries().await?;
        entries.insert(CART_STORAGE_KEY.to_string(), serde_json::to_string(cart)?);

        let contents = serde_json::to_string_pretty(&entries)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}

// =============================================================================
// InMemoryPersistence
// =============================================================================

/// In-memory persistence with the same string key-value semantics as the
/// file store.
#[derive(Debug, Default)]
pub struct InMemoryPersistence {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryPersistence {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an already-serialized cart snapshot.
    #[must_use]
    pub fn with_cart(cart: &Cart) -> Self {
        let store = Self::new();
        let serialized = serde_json::to_string(cart).unwrap_or_else(|_| "[]".to_string());
        store
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(CART_STORAGE_KEY.to_string(), serialized);
        store
    }
}

impl CartPersistence for InMemoryPersistence {
    async fn load(&self) -> Result<Option<Cart>, PersistenceError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(CART_STORAGE_KEY) {
            Some(stored) => Ok(Some(serde_json::from_str(stored)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), PersistenceError> {
        let serialized = serde_json::to_string(cart)?;
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(CART_STORAGE_KEY.to_string(), serialized);
        Ok(())
    }
}
