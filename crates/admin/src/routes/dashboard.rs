//! Dashboard route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use super::AdminUserView;
use crate::filters;
use crate::middleware::{Flash, RequireAdminAuth};
use crate::state::AppState;

/// A dashboard card.
#[derive(Debug, Clone)]
pub struct DashboardCard {
    pub title: &'static str,
    pub href: &'static str,
    /// Record count or status line under the title.
    pub detail: String,
    /// Whether the list behind the card has unsaved changes.
    pub pending: bool,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub flash: Option<String>,
    pub maintenance: Vec<DashboardCard>,
    pub sales: Vec<DashboardCard>,
}

/// Dashboard page handler.
#[instrument(skip_all)]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    Flash(flash): Flash,
    State(state): State<AppState>,
) -> DashboardTemplate {
    let products = state.products().read().await;
    let customers = state.customers().read().await;

    DashboardTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/",
        flash,
        maintenance: vec![
            DashboardCard {
                title: "Productos",
                href: "/products",
                detail: format!("{} registrados", products.len()),
                pending: products.has_pending_changes(),
            },
            DashboardCard {
                title: "Clientes",
                href: "/customers",
                detail: format!("{} registrados", customers.len()),
                pending: customers.has_pending_changes(),
            },
        ],
        sales: vec![DashboardCard {
            title: "Boleta",
            href: "/sales",
            detail: "Comprobantes de venta".to_string(),
            pending: false,
        }],
    }
}

/// Receipts page template.
#[derive(Template, WebTemplate)]
#[template(path = "sales.html")]
pub struct SalesTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub flash: Option<String>,
}

/// Receipts placeholder.
pub async fn sales(RequireAdminAuth(admin): RequireAdminAuth, Flash(flash): Flash) -> SalesTemplate {
    SalesTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/sales",
        flash,
    }
}
