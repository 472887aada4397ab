//! Authentication route handlers for admin.
//!
//! Credentials are checked by the REST backend; only users it reports
//! with the `ADMIN` role get a back-office session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAdminAuth, clear_current_admin, set_current_admin, set_flash};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Alert for blank credentials.
pub const MISSING_CREDENTIALS: &str = "Ingrese su correo y contraseña";

/// Alert for a valid login without the admin role.
pub const NOT_AN_ADMIN: &str = "Acceso restringido a administradores";

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub email: String,
}

/// Render the login page.
///
/// GET /auth/login
pub async fn login_page(OptionalAdminAuth(admin): OptionalAdminAuth) -> Response {
    if admin.is_some_and(|a| a.role.is_admin()) {
        return Redirect::to("/").into_response();
    }
    LoginTemplate {
        error: None,
        email: String::new(),
    }
    .into_response()
}

/// Log in through the backend.
///
/// POST /auth/login
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let retry = |error: String| {
        LoginTemplate {
            error: Some(error),
            email: form.email.clone(),
        }
        .into_response()
    };

    if form.email.trim().is_empty() || form.password.expose_secret().is_empty() {
        return Ok(retry(MISSING_CREDENTIALS.to_string()));
    }

    let response = match state.backend().login(form.email.trim(), &form.password).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Admin login failed: {e}");
            return Ok(retry(e.user_message()));
        }
    };

    if !response.data.role.is_admin() {
        tracing::warn!(role = %response.data.role, "Non-admin login refused");
        return Ok(retry(NOT_AN_ADMIN.to_string()));
    }

    let admin = CurrentAdmin::from(response.data);
    set_current_admin(&session, &admin).await?;
    set_sentry_user(&admin.email);
    set_flash(&session, &response.message).await?;
    tracing::info!("Admin logged in");

    Ok(Redirect::to("/").into_response())
}

/// Logout and clear session.
///
/// POST /auth/logout
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    clear_current_admin(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/auth/login"))
}
