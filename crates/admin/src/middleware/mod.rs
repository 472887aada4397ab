//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added by the binary)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions, in-process store)
//! 4. Security headers (stricter CSP than the storefront: no external scripts)
//!
//! Authentication is enforced per handler with [`RequireAdminAuth`].

pub mod auth;
pub mod security_headers;
pub mod session;

pub use auth::{
    Flash, OptionalAdminAuth, RequireAdminAuth, clear_current_admin, set_current_admin, set_flash,
};
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
