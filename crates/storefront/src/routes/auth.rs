//! Authentication route handlers.
//!
//! Login and registration share one page; `?register=1` opens the
//! registration panel. Both forms are checked locally and then forwarded
//! to the REST backend.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use la_reyna_core::FieldErrors;
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{Nav, OptionalAuth, set_flash};
use crate::services::auth::{
    AuthError, AuthService, Registration, clear_current_user, set_current_user,
};
use crate::state::AppState;

/// Alert when the backend refuses a registration.
const REGISTER_REJECTED_MESSAGE: &str = "Error en el registro";

/// Alert when the backend cannot be reached during registration.
const REGISTER_UNAVAILABLE_MESSAGE: &str = "No se pudo conectar al servidor";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

/// Registration form data.
#[derive(Deserialize)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: SecretString,
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// Query parameters for the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub register: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Registration fields echoed back after a failed attempt.
#[derive(Clone, Default)]
pub struct RegisterValues {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Login / register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: Nav,
    pub error: Option<String>,
    pub success: Option<String>,
    pub email: String,
    pub show_register: bool,
    pub register: RegisterValues,
    pub field_errors: FieldErrors,
}

impl LoginTemplate {
    fn new(nav: Nav) -> Self {
        Self {
            nav,
            error: None,
            success: None,
            email: String::new(),
            show_register: false,
            register: RegisterValues::default(),
            field_errors: FieldErrors::new(),
        }
    }

    /// Inline message for a registration field.
    #[must_use]
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field)
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
///
/// Already logged-in visitors are sent home.
pub async fn login_page(
    nav: Nav,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<LoginQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    let mut page = LoginTemplate::new(nav);
    page.show_register = query.register.is_some();
    page.into_response()
}

/// Handle login form submission.
///
/// On success the user and token go into the session, the backend's
/// greeting is queued as an alert, and admins are sent to the back-office
/// when one is configured.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    nav: Nav,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let outcome = match AuthService::new(state.backend())
        .login(&form.email, &form.password)
        .await
    {
        Ok(outcome) => outcome,
        Err(AuthError::Storage(e)) => return Err(AppError::Storage(e)),
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            let mut page = LoginTemplate::new(nav);
            page.error = Some(e.user_message());
            page.email = form.email;
            return Ok(page.into_response());
        }
    };

    set_current_user(&session, &outcome)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    set_sentry_user(&outcome.user.email, outcome.user.role.as_str());
    set_flash(&session, &outcome.message).await?;

    let destination = match (&state.config().admin_url, outcome.user.is_admin()) {
        (Some(admin_url), true) => admin_url.clone(),
        _ => "/".to_string(),
    };
    Ok(Redirect::to(&destination).into_response())
}

/// Handle logout.
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    clear_sentry_user();
    Ok(Redirect::to("/"))
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Handle registration form submission.
///
/// Success returns to the login panel with the email filled in.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    nav: Nav,
    Form(form): Form<RegisterForm>,
) -> Response {
    let values = RegisterValues {
        full_name: form.full_name.clone(),
        email: form.email.clone(),
        phone: form.phone.clone(),
        address: form.address.clone(),
    };
    let registration = Registration {
        full_name: form.full_name,
        email: form.email,
        password: form.password,
        phone: form.phone,
        address: form.address,
    };

    let mut page = LoginTemplate::new(nav);
    match AuthService::new(state.backend()).register(registration).await {
        Ok(message) => {
            page.success = Some(message);
            page.email = values.email;
        }
        Err(e) => {
            tracing::warn!("Registration failed: {e}");
            page.show_register = true;
            page.error = Some(match &e {
                AuthError::Invalid(_) => e.user_message(),
                AuthError::Rejected(_) => REGISTER_REJECTED_MESSAGE.to_string(),
                AuthError::Unavailable(_) | AuthError::Storage(_) => {
                    REGISTER_UNAVAILABLE_MESSAGE.to_string()
                }
            });
            if let AuthError::Invalid(errors) = e {
                page.field_errors = errors;
            }
            page.register = values;
        }
    }
    page.into_response()
}
