//! Application state shared across handlers.

use std::sync::Arc;

use la_reyna_backend::BackendClient;
use tokio::sync::RwLock;

use crate::config::AdminConfig;
use crate::maintenance::Maintenance;
use crate::models::{Customer, Product, customer, product};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The two lists live for the whole process;
/// a restart brings back the seed data.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    backend: BackendClient,
    products: RwLock<Maintenance<Product>>,
    customers: RwLock<Maintenance<Customer>>,
}

impl AppState {
    /// Create state with the seed product and customer lists.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let backend = BackendClient::new(&config.backend_url);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                products: RwLock::new(Maintenance::new(product::seed())),
                customers: RwLock::new(Maintenance::new(customer::seed())),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Product maintenance list.
    #[must_use]
    pub fn products(&self) -> &RwLock<Maintenance<Product>> {
        &self.inner.products
    }

    /// Customer maintenance list.
    #[must_use]
    pub fn customers(&self) -> &RwLock<Maintenance<Customer>> {
        &self.inner.customers
    }
}
