//! La Reyna Core - Shared types library.
//!
//! This crate provides common types used across all La Reyna components:
//! - `storefront` - Public-facing shop (catalog, cart, checkout)
//! - `admin` - Back-office for product and customer maintenance
//! - `backend` - Client for the external REST backend
//! - `cli` - Command-line tools
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no HTTP
//! clients, no sessions. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for codes, prices, emails, phones and roles
//! - [`validation`] - Field-scoped form error maps

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::FieldErrors;
