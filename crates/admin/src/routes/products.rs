//! Product maintenance route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use la_reyna_core::{FieldErrors, ProductCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::{AdminUserView, CHANGES_SAVED, NOTHING_TO_SAVE, SelectOption, select_options};
use crate::error::AppError;
use crate::filters;
use crate::maintenance::MaintenanceError;
use crate::middleware::{Flash, RequireAdminAuth, set_flash};
use crate::models::product::{ALL_CATEGORIES, BRANDS};
use crate::models::{CODE_TAKEN, Category, Product, ProductForm, Sex};
use crate::state::AppState;

const SECTION: &str = "/products";

/// Alert when a search finds nothing.
pub const NOT_FOUND_MESSAGE: &str = "No se encontró ningún producto con ese código";

// =============================================================================
// Views
// =============================================================================

/// Product row for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub code: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub sex: String,
    pub price: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            code: product.code.to_string(),
            name: product.name.clone(),
            category: product.category.to_string(),
            brand: product.brand.clone().unwrap_or_default(),
            sex: product.sex.map(|s| s.to_string()).unwrap_or_default(),
            price: product.price.display(),
        }
    }
}

/// List query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

/// Search query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub code: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Products list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub flash: Option<String>,
    pub products: Vec<ProductView>,
    pub categories: Vec<SelectOption>,
    pub pending: bool,
    /// Records in the last saved snapshot.
    pub saved_count: usize,
}

/// Add / edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub flash: Option<String>,
    pub title: &'static str,
    pub action: String,
    pub editing: bool,
    pub form: ProductForm,
    pub categories: Vec<SelectOption>,
    pub brands: Vec<SelectOption>,
    pub sexes: Vec<SelectOption>,
    pub errors: FieldErrors,
}

impl ProductFormTemplate {
    fn new(admin_user: AdminUserView, form: ProductForm, editing: bool) -> Self {
        let (title, action) = if editing {
            ("Editar Producto", format!("{SECTION}/{}/edit", form.code))
        } else {
            ("Nuevo Producto", SECTION.to_string())
        };
        Self {
            admin_user,
            current_path: SECTION,
            flash: None,
            title,
            action,
            editing,
            categories: select_options(Category::ALL.map(Category::as_str), &form.category),
            brands: select_options(BRANDS, &form.brand),
            sexes: select_options(Sex::ALL.map(Sex::as_str), &form.sex),
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
#[template(path = "products/search.html")]
pub struct ProductSearchTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub flash: Option<String>,
    pub code: String,
    pub error: Option<&'static str>,
}

/// Read-only detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub flash: Option<String>,
    pub product: ProductView,
}

/// Delete confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "products/delete.html")]
pub struct ProductDeleteTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub flash: Option<String>,
    pub product: ProductView,
}

fn parse_code(raw: &str) -> Result<ProductCode, AppError> {
    ProductCode::parse(raw).map_err(|_| AppError::NotFound(raw.to_string()))
}

async fn find(state: &AppState, code: &ProductCode) -> Result<ProductView, AppError> {
    state
        .products()
        .read()
        .await
        .find(code)
        .map(ProductView::from)
        .ok_or_else(|| AppError::NotFound(code.to_string()))
}

// =============================================================================
// Handlers
// =============================================================================

/// Products list, optionally filtered by category.
#[instrument(skip_all, fields(category = ?query.category))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    Flash(flash): Flash,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ProductsIndexTemplate {
    let selected = query.category.as_deref().unwrap_or(ALL_CATEGORIES);
    let list = state.products().read().await;

    ProductsIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: SECTION,
        flash,
        products: list
            .filter(|p| p.in_category(Some(selected)))
            .map(ProductView::from)
            .collect(),
        categories: select_options(
            std::iter::once(ALL_CATEGORIES).chain(Category::ALL.map(Category::as_str)),
            selected,
        ),
        pending: list.has_pending_changes(),
        saved_count: list.snapshot().len(),
    }
}

/// Empty add form.
pub async fn new_form(RequireAdminAuth(admin): RequireAdminAuth) -> ProductFormTemplate {
    ProductFormTemplate::new(AdminUserView::from(&admin), ProductForm::default(), false)
}

/// Add a product.
#[instrument(skip_all, fields(code = %form.code))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let rejected = {
        let mut list = state.products().write().await;
        match form.clone().into_new(&list).map(|product| list.add(product)) {
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
            set_flash(&session, "Producto agregado").await?;
            Ok(Redirect::to(SECTION).into_response())
        }
        Some(errors) => {
            tracing::debug!(fields = errors.len(), "Product form rejected");
            let mut page = ProductFormTemplate::new(AdminUserView::from(&admin), form, false);
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
    let mut page = ProductSearchTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: SECTION,
        flash: None,
        code: raw.clone(),
        error: None,
    };
    if raw.trim().is_empty() {
        return page.into_response();
    }

    let found = match ProductCode::parse(&raw) {
        Ok(code) => state.products().read().await.contains(&code).then_some(code),
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

/// Read-only product detail.
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    Flash(flash): Flash,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<ProductShowTemplate, AppError> {
    let product = find(&state, &parse_code(&code)?).await?;
    Ok(ProductShowTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: SECTION,
        flash,
        product,
    })
}

/// Edit form prefilled with the product.
pub async fn edit_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<ProductFormTemplate, AppError> {
    let code = parse_code(&code)?;
    let form = state
        .products()
        .read()
        .await
        .find(&code)
        .map(ProductForm::from_product)
        .ok_or_else(|| AppError::NotFound(code.to_string()))?;
    Ok(ProductFormTemplate::new(AdminUserView::from(&admin), form, true))
}

/// Save an edited product. The code in the URL wins over the form.
#[instrument(skip_all, fields(code = %code))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(code): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let code = parse_code(&code)?;
    match form.clone().into_update(code.clone()) {
        Ok(product) => {
            state.products().write().await.replace(product)?;
            set_flash(&session, "Producto actualizado").await?;
            Ok(Redirect::to(&format!("{SECTION}/{code}")).into_response())
        }
        Err(errors) => {
            let form = ProductForm {
                code: code.to_string(),
                ..form
            };
            let mut page = ProductFormTemplate::new(AdminUserView::from(&admin), form, true);
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
) -> Result<ProductDeleteTemplate, AppError> {
    let product = find(&state, &parse_code(&code)?).await?;
    Ok(ProductDeleteTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: SECTION,
        flash: None,
        product,
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
    let removed = state.products().write().await.delete(&parse_code(&code)?)?;
    set_flash(&session, &format!("Producto {} eliminado", removed.name)).await?;
    Ok(Redirect::to(SECTION))
}

/// Resynchronise the snapshot with the working list.
pub async fn save(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<Redirect, AppError> {
    let saved = state.products().write().await.save_changes();
    set_flash(&session, if saved { CHANGES_SAVED } else { NOTHING_TO_SAVE }).await?;
    Ok(Redirect::to(SECTION))
}
