//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions, in-memory store)
//! 4. Security headers (CSP, framing, sniffing)

pub mod auth;
pub mod security_headers;
pub mod session;

pub use auth::{Nav, OptionalAuth, set_flash};
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
