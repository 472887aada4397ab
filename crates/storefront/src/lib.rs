//! La Reyna storefront library.
//!
//! The public shop: catalog, product pages, a session-backed cart,
//! checkout and customer login. Built as a library so the binary and the
//! integration tests share one router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn,
    routing::get,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::catalog::CatalogSource;
use crate::state::AppState;

/// Directory holding CSS, images and scripts.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the storefront router with its middleware stack.
///
/// Sentry layers are added by the binary so tests run without them.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// With the API catalog, checks that the backend answers. Returns 503
/// Service Unavailable if it does not.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.catalog().source() == CatalogSource::Static {
        return StatusCode::OK;
    }
    match state.backend().get_products().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("Backend not ready: {e}");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
