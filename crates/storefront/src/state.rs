//! Application state shared across handlers.

use std::sync::Arc;

use la_reyna_backend::BackendClient;
use tower_sessions::Session;

use crate::cart::{CartNotifier, CartStore};
use crate::catalog::Catalog;
use crate::checkout::Checkout;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the backend client, the catalog and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    backend: BackendClient,
    catalog: Catalog,
    cart_notifier: CartNotifier,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let backend = BackendClient::new(&config.backend_url);
        let catalog = Catalog::new(config.catalog_source, backend.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                catalog,
                cart_notifier: CartNotifier::new(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the REST backend client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Process-wide cart change notifier.
    #[must_use]
    pub fn cart_notifier(&self) -> &CartNotifier {
        &self.inner.cart_notifier
    }

    /// Cart operations over the visitor's session.
    #[must_use]
    pub fn carts(&self, session: Session) -> CartStore<Session> {
        CartStore::new(session, self.inner.cart_notifier.clone())
    }

    /// Checkout operations over the visitor's session.
    #[must_use]
    pub fn checkout(&self, session: Session) -> Checkout<Session> {
        Checkout::new(session.clone(), self.carts(session))
    }
}
