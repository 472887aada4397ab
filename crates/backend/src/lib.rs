//! Client for the La Reyna REST backend.
//!
//! The backend is an external service that owns user accounts and the
//! product table. This crate only knows the shapes it consumes:
//!
//! ```text
//! POST /auth/user/login    form: correo, password   -> {message, data, token}
//! POST /auth/user/create   JSON user                -> {message, data}
//! GET  /api/productos                               -> [{id_producto, ...}]
//! ```
//!
//! Calls are made once: no retry, no backoff, no request timeout beyond
//! what the connection itself imposes.
//!
//! # Example
//!
//! ```rust,ignore
//! use la_reyna_backend::BackendClient;
//!
//! let client = BackendClient::new("http://localhost:3001");
//! let login = client.login("admin@gmail.com", &password).await?;
//! tracing::info!(role = %login.data.role, "{}", login.message);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

pub use types::{BackendProduct, BackendUser, CreateUserResponse, LoginResponse, NewUser};

use types::ErrorBody;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend rejected request ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: StatusCode,
        /// Message from the backend body, or the raw body text.
        message: String,
    },

    /// The success body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BackendError {
    /// Message suitable for showing to the user.
    ///
    /// Backend rejections carry their own message; transport and parse
    /// failures collapse to a generic "could not reach the server".
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } if !message.is_empty() => message.clone(),
            Self::Rejected { .. } | Self::Parse(_) => "Error en la respuesta del servidor".to_string(),
            Self::Http(_) => "Error al conectar con el servidor".to_string(),
        }
    }

    /// Whether the backend itself refused the request (as opposed to a
    /// network or parse failure).
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Client for the REST backend.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the backend at `base_url` (e.g. `http://localhost:3001`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: Arc::new(BackendClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
            }),
        }
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` with the backend's message for bad
    /// credentials, `BackendError::Http` if the backend is unreachable.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, BackendError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("/auth/user/login"))
            .form(&[("correo", email), ("password", password.expose_secret())])
            .send()
            .await?;

        parse_response(response).await
    }

    /// Create a user account (customer registration or admin seeding).
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` if the backend refuses the user
    /// (e.g. it already exists), `BackendError::Http` if unreachable.
    #[instrument(skip(self, user), fields(email = %user.email, role = %user.role))]
    pub async fn create_user(&self, user: &NewUser) -> Result<CreateUserResponse, BackendError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("/auth/user/create"))
            .json(&user.body())
            .send()
            .await?;

        parse_response(response).await
    }

    /// Fetch the product table.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails or the body is not a
    /// product list.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<BackendProduct>, BackendError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("/api/productos"))
            .send()
            .await?;

        parse_response(response).await
    }
}

/// Decode a success body, or turn a failure status into `Rejected`.
async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map_or_else(|_| body.trim().to_string(), |err| err.message);
        tracing::warn!(status = %status, %message, "Backend returned non-success status");
        return Err(BackendError::Rejected { status, message });
    }

    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        Form, Json, Router,
        http::StatusCode as AxumStatus,
        routing::{get, post},
    };
    use la_reyna_core::{Email, Phone, Role};
    use serde_json::{Value, json};

    use super::*;

    async fn mock_login(Form(form): Form<Vec<(String, String)>>) -> (AxumStatus, Json<Value>) {
        let correo = form
            .iter()
            .find(|(k, _)| k == "correo")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        let password = form
            .iter()
            .find(|(k, _)| k == "password")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();

        if correo == "admin@gmail.com" && password == "admin" {
            (
                AxumStatus::OK,
                Json(json!({
                    "message": "Bienvenido",
                    "data": {"nombreCompleto": "Administrador", "correo": correo, "role": "ADMIN"},
                    "token": "t0k3n"
                })),
            )
        } else {
            (
                AxumStatus::UNAUTHORIZED,
                Json(json!({"message": "Credenciales incorrectas"})),
            )
        }
    }

    async fn mock_create(Json(body): Json<Value>) -> (AxumStatus, String) {
        if body["correo"] == "taken@example.com" {
            (AxumStatus::CONFLICT, "Usuario ya existe".to_string())
        } else {
            (
                AxumStatus::OK,
                json!({"message": "User created", "data": body}).to_string(),
            )
        }
    }

    async fn mock_products() -> Json<Value> {
        Json(json!([
            {"id_producto": 1, "nombre_producto": "Cielo en Rosa", "precio": 113.0, "categoria": 1},
            {"id_producto": 2, "nombre_producto": "Ocean Breeze", "precio": 155.5, "categoria": 2}
        ]))
    }

    async fn spawn_mock() -> BackendClient {
        let app = Router::new()
            .route("/auth/user/login", post(mock_login))
            .route("/auth/user/create", post(mock_create))
            .route("/api/productos", get(mock_products));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        BackendClient::new(&format!("http://{addr}/"))
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = BackendClient::new("http://localhost:3001/");
        assert_eq!(client.base_url(), "http://localhost:3001");
        assert_eq!(
            client.endpoint("/api/productos"),
            "http://localhost:3001/api/productos"
        );
    }

    #[tokio::test]
    async fn test_login_success() {
        let client = spawn_mock().await;
        let response = client
            .login("admin@gmail.com", &SecretString::from("admin"))
            .await
            .unwrap();

        assert_eq!(response.message, "Bienvenido");
        assert_eq!(response.data.role, Role::Admin);
        assert_eq!(response.token, "t0k3n");
    }

    #[tokio::test]
    async fn test_login_rejected_carries_backend_message() {
        let client = spawn_mock().await;
        let err = client
            .login("admin@gmail.com", &SecretString::from("wrong"))
            .await
            .unwrap_err();

        assert!(err.is_rejection());
        assert_eq!(err.user_message(), "Credenciales incorrectas");
    }

    #[tokio::test]
    async fn test_create_user_plain_text_error() {
        let client = spawn_mock().await;
        let user = NewUser::customer(
            "Taken".to_string(),
            Email::parse("taken@example.com").unwrap(),
            SecretString::from("pw"),
            Phone::parse("912345678").unwrap(),
            String::new(),
        );

        let err = client.create_user(&user).await.unwrap_err();
        assert_eq!(err.user_message(), "Usuario ya existe");
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let client = spawn_mock().await;
        let user = NewUser::admin(
            "Administrador".to_string(),
            Email::parse("admin@gmail.com").unwrap(),
            SecretString::from("admin"),
            Phone::parse("999999999").unwrap(),
            "Administración Central".to_string(),
        );

        let response = client.create_user(&user).await.unwrap();
        assert_eq!(response.message, "User created");
        assert_eq!(response.data.unwrap()["role"], "ADMIN");
    }

    #[tokio::test]
    async fn test_get_products() {
        let client = spawn_mock().await;
        let products = client.get_products().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].name, "Ocean Breeze");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_http_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = BackendClient::new(&format!("http://{addr}"));
        let err = client.get_products().await.unwrap_err();
        assert!(!err.is_rejection());
        assert_eq!(err.user_message(), "Error al conectar con el servidor");
    }
}
