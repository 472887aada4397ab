//! Cart persistence and change notification.

use tokio::sync::broadcast;
use tracing::debug;

use super::{Cart, CartLineItem};
use crate::storage::{KeyValueStore, StorageError, keys};

/// Payload-free "the cart changed" signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartUpdated;

/// Fan-out channel for [`CartUpdated`] signals.
///
/// Sending never blocks; with no subscribers the signal is dropped.
#[derive(Debug, Clone)]
pub struct CartNotifier {
    sender: broadcast::Sender<CartUpdated>,
}

impl CartNotifier {
    /// Buffered signals per subscriber before the oldest are dropped.
    const CAPACITY: usize = 64;

    /// Create a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(Self::CAPACITY);
        Self { sender }
    }

    /// Subscribe to future signals.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartUpdated> {
        self.sender.subscribe()
    }

    /// Broadcast a signal to current subscribers.
    pub fn notify(&self) {
        // Err only means nobody is listening.
        let _ = self.sender.send(CartUpdated);
    }
}

impl Default for CartNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads and writes one visitor's cart.
///
/// Every mutation is a full read-modify-write of the `cart` key followed by
/// a [`CartUpdated`] signal. Mutations that change nothing neither write
/// nor signal.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    store: S,
    notifier: CartNotifier,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Wrap a key-value store.
    #[must_use]
    pub const fn new(store: S, notifier: CartNotifier) -> Self {
        Self { store, notifier }
    }

    /// Current cart; missing means empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store fails or holds a malformed cart.
    pub async fn get(&self) -> Result<Cart, StorageError> {
        Ok(self.store.load::<Cart>(keys::CART).await?.unwrap_or_default())
    }

    /// Replace the cart and signal subscribers.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn set(&self, cart: &Cart) -> Result<(), StorageError> {
        self.store.save(keys::CART, cart).await?;
        debug!(lines = cart.len(), count = cart.count(), "Cart saved");
        self.notifier.notify();
        Ok(())
    }

    /// Subscribe to cart change signals.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartUpdated> {
        self.notifier.subscribe()
    }

    /// Total units in the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be read.
    pub async fn count(&self) -> Result<u32, StorageError> {
        Ok(self.get().await?.count())
    }

    /// Add `item.quantity` units of `item`, merging by name and volume.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be read or written.
    pub async fn add_to_cart(&self, item: CartLineItem) -> Result<Cart, StorageError> {
        let mut cart = self.get().await?;
        cart.add(item);
        self.set(&cart).await?;
        Ok(cart)
    }

    /// Remove the line at `index`. Out-of-range indices are a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be read or written.
    pub async fn remove_item(&self, index: usize) -> Result<Cart, StorageError> {
        let mut cart = self.get().await?;
        if cart.remove(index).is_some() {
            self.set(&cart).await?;
        } else {
            debug!(index, "Remove ignored: no such line");
        }
        Ok(cart)
    }

    /// Set the quantity of the line at `index`.
    ///
    /// Zero is silently ignored, as is an out-of-range index.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be read or written.
    pub async fn update_quantity(&self, index: usize, quantity: u32) -> Result<Cart, StorageError> {
        let mut cart = self.get().await?;
        if cart.update_quantity(index, quantity) {
            self.set(&cart).await?;
        } else {
            debug!(index, quantity, "Quantity update ignored");
        }
        Ok(cart)
    }

    /// Drop every line and signal subscribers.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key cannot be removed.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(keys::CART).await?;
        debug!("Cart cleared");
        self.notifier.notify();
        Ok(())
    }
}
