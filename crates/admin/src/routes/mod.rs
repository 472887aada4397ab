//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check
//!
//! # Auth (backend login, ADMIN role only)
//! GET  /auth/login                      - Login page
//! POST /auth/login                      - Log in
//! POST /auth/logout                     - Logout
//!
//! # Dashboard
//! GET  /                                - Maintenance and sales sections
//! GET  /sales                           - Receipts (placeholder)
//!
//! # Products
//! GET  /products                        - List (?category=)
//! GET  /products/new                    - Add form
//! POST /products                        - Add
//! GET  /products/search                 - Search by ?code=
//! POST /products/save                   - Save changes
//! GET  /products/{code}                 - Detail
//! GET  /products/{code}/edit            - Edit form
//! POST /products/{code}/edit            - Update
//! GET  /products/{code}/delete          - Confirm deletion
//! POST /products/{code}/delete          - Delete
//!
//! # Customers
//! (same as products under /customers; the list filters on ?q=)
//! ```

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Logged-in admin as shown in the page header.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub name: String,
    pub email: String,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.clone(),
        }
    }
}

/// One `<option>` of a select box.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

/// Build select options, marking the one equal to `current`.
pub fn select_options<'a>(
    values: impl IntoIterator<Item = &'a str>,
    current: &str,
) -> Vec<SelectOption> {
    values
        .into_iter()
        .map(|value| SelectOption {
            value: value.to_string(),
            selected: value == current.trim(),
        })
        .collect()
}

/// Alert after "save changes" with nothing to save.
pub const NOTHING_TO_SAVE: &str = "No hay cambios pendientes";

/// Alert after "save changes".
pub const CHANGES_SAVED: &str = "Cambios guardados con éxito";

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/new", get(products::new_form))
        .route("/search", get(products::search))
        .route("/save", post(products::save))
        .route("/{code}", get(products::show))
        .route("/{code}/edit", get(products::edit_form).post(products::update))
        .route(
            "/{code}/delete",
            get(products::confirm_delete).post(products::delete),
        )
}

fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::index).post(customers::create))
        .route("/new", get(customers::new_form))
        .route("/search", get(customers::search))
        .route("/save", post(customers::save))
        .route("/{code}", get(customers::show))
        .route(
            "/{code}/edit",
            get(customers::edit_form).post(customers::update),
        )
        .route(
            "/{code}/delete",
            get(customers::confirm_delete).post(customers::delete),
        )
}

/// Build the admin router (without middleware or state).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/sales", get(dashboard::sales))
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .nest("/products", product_routes())
        .nest("/customers", customer_routes())
}
