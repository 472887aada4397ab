//! Customer maintenance route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use la_reyna_core::{CustomerCode, FieldErrors};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::{AdminUserView, CHANGES_SAVED, NOTHING_TO_SAVE};
use crate::error::AppError;
use crate::filters;
use crate::maintenance::MaintenanceError;
use crate::middleware::{Flash, RequireAdminAuth, set_flash};
use crate::models::{CODE_TAKEN, Customer, CustomerForm};
use crate::state::AppState;

const SECTION: &str = "/customers";

/// Alert when a search finds nothing.
pub const NOT_FOUND_MESSAGE: &str = "No se encontró ningún cliente con ese código";

/// Customer row for templates.
#[derive(Debug, Clone)]
pub struct CustomerView {
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub orders: u32,
}

impl From<&Customer> for CustomerView {
    fn from(customer: &Customer) -> Self {
        Self {
            code: customer.code.to_string(),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            full_name: customer.full_name(),
            email: customer.email.to_string(),
            address: customer.address.clone(),
            phone: customer.phone.to_string(),
            orders: customer.orders,
        }
    }
}

/// List query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Quick search over code and names.
    pub q: Option<String>,
}

/// Search query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub code: Option<String>,
}

/// Customers list page template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/index.html")]
pub struct CustomersIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub flash: Option<String>,
    pub customers: Vec<CustomerView>,
    pub query: String,
    pub pending: bool,
    /// Records in the last saved snapshot.
    pub saved_count: usize,
}

/// Add / edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/form.html")]
pub struct CustomerFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub flash: Option<String>,
    pub title: &'static str,
    pub action: String,
    pub editing: bool,
    pub form: CustomerForm,
    pub errors: FieldErrors,
}

impl CustomerFormTemplate {
    fn new(admin_user: AdminUserView, form: CustomerForm, editing: bool) -> Self {
        let (title, action) = if editing {
            ("Editar Cliente", format!("{SECTION}/{}/edit", form.code))
        } else {
            ("Nuevo Cliente", SECTION.to_string())
        };
        Self {
            admin_user,
            current_path: SECTION,
            flash: None,
            title,
            action,
            editing,
            form,
            errors: FieldErrors::new(),
        }
    }

    /// Inline message for a field.
    #[must_use]
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }
}

/// Search form template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/search.html")]
pub struct CustomerSearchTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub flash: Option<String>,
    pub code: String,
    pub error: Option<&'static str>,
}

/// Read-only detail template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/show.html")]
pub struct CustomerShowTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub flash: Option<String>,
    pub customer: CustomerView,
}

/// Delete confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/delete.html")]
pub struct CustomerDeleteTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub flash: Option<String>,
    pub customer: CustomerView,
}

fn parse_code(raw: &str) -> Result<CustomerCode, AppError> {
    CustomerCode::parse(raw).map_err(|_| AppError::NotFound(raw.to_string()))
}

async fn find(state: &AppState, code: &CustomerCode) -> Result<CustomerView, AppError> {
    state
        .customers()
        .read()
        .await
        .find(code)
        .map(CustomerView::from)
        .ok_or_else(|| AppError::NotFound(code.to_string()))
}

/// Customers list with optional quick search.
#[instrument(skip_all, fields(q = ?query.q))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    Flash(flash): Flash,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> CustomersIndexTemplate {
    let q = query.q.unwrap_or_default();
    let list = state.customers().read().await;

    CustomersIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: SECTION,
        flash,
        customers: list
            .filter(|c| c.matches(&q))
            .map(CustomerView::from)
            .collect(),
        pending: list.has_pending_changes(),
        saved_count: list.snapshot().len(),
        query: q,
    }
}

/// Empty add form.
pub async fn new_form(RequireAdminAuth(admin): RequireAdminAuth) -> CustomerFormTemplate {
    CustomerFormTemplate::new(AdminUserView::from(&admin), CustomerForm::default(), false)
}

/// Add a customer.
#[instrument(skip_all, fields(code = %form.code))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CustomerForm>,
) -> Result<Response, AppError> {
    let rejected = {
        let mut list = state.customers().write().await;
        match form.clone().into_new(&list).map(|customer| list.add(customer)) {
            Ok(Ok(())) => None,
            Ok(Err(MaintenanceError::DuplicateCode(_))) => {
                let mut errors = FieldErrors::new();
                errors.insert("code", CODE_TAKEN);
                Some(errors)
            }
            Ok(Err(e)) => return Err(e.into()),
            Err(errors) => Some(errors),
        }
    };

    match rejected {
        None => {
            set_flash(&session, "Cliente agregado").await?;
            Ok(Redirect::to(SECTION).into_response())
        }
        Some(errors) => {
            tracing::debug!(fields = errors.len(), "Customer form rejected");
            let mut page = CustomerFormTemplate::new(AdminUserView::from(&admin), form, false);
            page.errors = errors;
            Ok(page.into_response())
        }
    }
}

/// Search by code; a hit goes to the detail page.
#[instrument(skip_all, fields(code = ?query.code))]
pub async fn search(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let raw = query.code.unwrap_or_default();
    let mut page = CustomerSearchTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: SECTION,
        flash: None,
        code: raw.clone(),
        error: None,
    };
    if raw.trim().is_empty() {
        return page.into_response();
    }

    let found = match CustomerCode::parse(&raw) {
        Ok(code) => state.customers().read().await.contains(&code).then_some(code),
        Err(_) => None,
    };
    match found {
        Some(code) => Redirect::to(&format!("{SECTION}/{code}")).into_response(),
        None => {
            page.error = Some(NOT_FOUND_MESSAGE);
            page.into_response()
        }
    }
}

/// Read-only customer detail.
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    Flash(flash): Flash,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<CustomerShowTemplate, AppError> {
    let customer = find(&state, &parse_code(&code)?).await?;
    Ok(CustomerShowTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: SECTION,
        flash,
        customer,
    })
}

/// Edit form prefilled with the customer.
pub async fn edit_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<CustomerFormTemplate, AppError> {
    let code = parse_code(&code)?;
    let form = state
        .customers()
        .read()
        .await
        .find(&code)
        .map(CustomerForm::from_customer)
        .ok_or_else(|| AppError::NotFound(code.to_string()))?;
    Ok(CustomerFormTemplate::new(AdminUserView::from(&admin), form, true))
}

/// Save an edited customer. The code in the URL wins over the form.
#[instrument(skip_all, fields(code = %code))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(code): Path<String>,
    Form(form): Form<CustomerForm>,
) -> Result<Response, AppError> {
    let code = parse_code(&code)?;
    match form.clone().into_update(code.clone()) {
        Ok(customer) => {
            state.customers().write().await.replace(customer)?;
            set_flash(&session, "Cliente actualizado").await?;
            Ok(Redirect::to(&format!("{SECTION}/{code}")).into_response())
        }
        Err(errors) => {
            let form = CustomerForm {
                code: code.to_string(),
                ..form
            };
            let mut page = CustomerFormTemplate::new(AdminUserView::from(&admin), form, true);
            page.errors = errors;
            Ok(page.into_response())
        }
    }
}

/// Ask before deleting.
pub async fn confirm_delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<CustomerDeleteTemplate, AppError> {
    let customer = find(&state, &parse_code(&code)?).await?;
    Ok(CustomerDeleteTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: SECTION,
        flash: None,
        customer,
    })
}

/// Delete after confirmation.
#[instrument(skip_all, fields(code = %code))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(code): Path<String>,
) -> Result<Redirect, AppError> {
    let removed = state.customers().write().await.delete(&parse_code(&code)?)?;
    set_flash(&session, &format!("Cliente {} eliminado", removed.full_name())).await?;
    Ok(Redirect::to(SECTION))
}

/// Resynchronise the snapshot with the working list.
pub async fn save(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<Redirect, AppError> {
    let saved = state.customers().write().await.save_changes();
    set_flash(&session, if saved { CHANGES_SAVED } else { NOTHING_TO_SAVE }).await?;
    Ok(Redirect::to(SECTION))
}
