//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (featured products)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check
//! GET  /contact                - Contact page
//!
//! # Products
//! GET  /products               - Catalog (?page=, ?q=, ?category=)
//! GET  /products/{key}         - Product detail
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (toast fragment, triggers cart-updated)
//! POST /cart/update            - Set quantity (cart_items fragment)
//! POST /cart/remove            - Remove line (cart_items fragment)
//! POST /cart/promo             - Apply promo code (cart_totals fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Checkout page
//! POST /checkout/edit          - Open the contact form
//! POST /checkout/contact       - Save the contact form
//! POST /checkout/cancel        - Close the contact form
//! POST /checkout/terms         - Toggle or accept terms
//! POST /checkout/payment       - Choose payment method
//! POST /checkout/submit        - Place the order
//!
//! # Auth
//! GET  /auth/login             - Login / register page
//! POST /auth/login             - Login action
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod contact;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Header for HTMX listeners that re-fetch the cart badge.
pub const CART_UPDATED_TRIGGER: (&str, &str) = ("HX-Trigger", "cart-updated");

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{key}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/promo", post(cart::promo))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/edit", post(checkout::edit))
        .route("/contact", post(checkout::save_contact))
        .route("/cancel", post(checkout::cancel))
        .route("/terms", post(checkout::terms))
        .route("/payment", post(checkout::payment))
        .route("/submit", post(checkout::submit))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/contact", get(contact::contact))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .nest("/auth", auth_routes())
}

/// Whether the request was issued by HTMX.
///
/// Non-HTMX form posts get a redirect instead of a fragment.
#[must_use]
pub fn is_htmx(headers: &axum::http::HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .is_some_and(|v| v.as_bytes() == b"true")
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue};

    use super::*;

    #[test]
    fn test_is_htmx() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));
        headers.insert("HX-Request", HeaderValue::from_static("true"));
        assert!(is_htmx(&headers));
    }
}
