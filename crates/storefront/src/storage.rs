//! Per-visitor key-value persistence.
//!
//! Everything the shop remembers about a visitor (cart, logged-in user,
//! checkout progress) lives under a handful of well-known keys. Values are
//! serialized as JSON and always replaced whole.
//!
//! Two backends implement [`KeyValueStore`]:
//!
//! - [`tower_sessions::Session`] for real requests
//! - [`InMemoryStore`] for tests and tooling

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::Mutex;
use tower_sessions::Session;

/// Well-known storage keys.
pub mod keys {
    /// The logged-in user (`CurrentUser`).
    pub const USER: &str = "user";

    /// Backend bearer token issued at login.
    pub const TOKEN: &str = "token";

    /// The cart line items.
    pub const CART: &str = "cart";

    /// Checkout page state (contact info, terms, payment method).
    pub const CHECKOUT: &str = "checkout";

    /// One-shot alert shown on the next full page.
    pub const FLASH: &str = "flash";
}

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// The session backend failed.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// A stored value could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Async key-value store holding JSON blobs.
///
/// A missing key loads as `None`; writes replace the whole value.
pub trait KeyValueStore: Send + Sync {
    /// Load and deserialize the value under `key`.
    fn load<T>(&self, key: &str) -> impl Future<Output = Result<Option<T>, StorageError>> + Send
    where
        T: DeserializeOwned + Send;

    /// Serialize and store `value` under `key`.
    fn save<T>(&self, key: &str, value: &T) -> impl Future<Output = Result<(), StorageError>> + Send
    where
        T: Serialize + Sync;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

impl KeyValueStore for Session {
    async fn load<T>(&self, key: &str) -> Result<Option<T>, StorageError>
    where
        T: DeserializeOwned + Send,
    {
        Ok(self.get::<T>(key).await?)
    }

    async fn save<T>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + Sync,
    {
        Ok(self.insert(key, value).await?)
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.remove_value(key).await?;
        Ok(())
    }
}

/// In-process store backed by a `HashMap`.
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    values: Arc<Mutex<HashMap<String, serde_json::Value>>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` currently holds a value.
    pub async fn contains(&self, key: &str) -> bool {
        self.values.lock().await.contains_key(key)
    }
}

impl KeyValueStore for InMemoryStore {
    async fn load<T>(&self, key: &str) -> Result<Option<T>, StorageError>
    where
        T: DeserializeOwned + Send,
    {
        let value = self.values.lock().await.get(key).cloned();
        Ok(value.map(serde_json::from_value).transpose()?)
    }

    async fn save<T>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + Sync,
    {
        let json = serde_json::to_value(value)?;
        self.values.lock().await.insert(key.to_owned(), json);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}
