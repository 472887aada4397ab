//! Shopping cart.
//!
//! The cart is an ordered list of line items keyed by product name plus
//! volume. [`Cart`] holds the pure operations; [`CartStore`] persists the
//! list under the `cart` storage key and broadcasts [`CartUpdated`] after
//! each change so the navigation badge can recount.

mod item;
mod store;
mod totals;

pub use item::{Cart, CartError, CartLineItem, LineKey};
pub use store::{CartNotifier, CartStore, CartUpdated};
pub use totals::{PROMO_CODE, Totals, promo_discount};
