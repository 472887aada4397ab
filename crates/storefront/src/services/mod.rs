//! Business logic services for the storefront.
//!
//! - `auth` - login and registration against the external backend

pub mod auth;
