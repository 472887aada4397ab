//! Wire types for the REST backend.
//!
//! Field names follow the backend's JSON exactly (Spanish, mixed camelCase
//! and snake_case); Rust-side names are English.

use la_reyna_core::{Email, Phone, Role};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// A user record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendUser {
    /// Backend primary key.
    #[serde(rename = "id_usuario", default)]
    pub id: Option<i64>,
    /// Full name.
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    /// Email address as stored by the backend (not re-validated).
    #[serde(rename = "correo")]
    pub email: String,
    /// Phone number.
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    /// Delivery address.
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    /// Account status (e.g. `activo`).
    #[serde(rename = "estado", default)]
    pub status: Option<String>,
    /// Role; missing roles are treated as plain users.
    #[serde(default)]
    pub role: Role,
}

/// Successful response from `POST /auth/user/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Human-readable message to show the user.
    pub message: String,
    /// The authenticated user.
    pub data: BackendUser,
    /// Bearer token for later calls.
    pub token: String,
}

/// Successful response from `POST /auth/user/create`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserResponse {
    /// Human-readable message to show the user.
    pub message: String,
    /// The stored user, when the backend echoes it.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Error body the backend sends with non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

/// A product row from `GET /api/productos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendProduct {
    /// Backend primary key.
    #[serde(rename = "id_producto")]
    pub id: i64,
    /// Display name.
    #[serde(rename = "nombre_producto")]
    pub name: String,
    /// Unit price in soles.
    #[serde(rename = "precio")]
    pub price: f64,
    /// Numeric category id.
    #[serde(rename = "categoria", default)]
    pub category: Option<i64>,
}

/// A user to be created through `POST /auth/user/create`.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: Email,
    pub password: SecretString,
    pub phone: Phone,
    pub address: String,
    pub role: Role,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("phone", &self.phone)
            .field("address", &self.address)
            .field("role", &self.role)
            .finish()
    }
}

impl NewUser {
    /// A shop customer registering from the login page.
    #[must_use]
    pub const fn customer(
        full_name: String,
        email: Email,
        password: SecretString,
        phone: Phone,
        address: String,
    ) -> Self {
        Self {
            full_name,
            email,
            password,
            phone,
            address,
            role: Role::User,
        }
    }

    /// An administrator account.
    #[must_use]
    pub const fn admin(
        full_name: String,
        email: Email,
        password: SecretString,
        phone: Phone,
        address: String,
    ) -> Self {
        Self {
            full_name,
            email,
            password,
            phone,
            address,
            role: Role::Admin,
        }
    }

    /// Borrowing view serialized as the request body.
    pub(crate) fn body(&self) -> NewUserBody<'_> {
        NewUserBody {
            full_name: &self.full_name,
            email: self.email.as_str(),
            password: self.password.expose_secret(),
            phone: self.phone.as_str(),
            address: &self.address,
            status: "activo",
            role_id: self.role.backend_id(),
            role: self.role,
        }
    }
}

/// JSON body for `POST /auth/user/create`.
#[derive(Serialize)]
pub(crate) struct NewUserBody<'a> {
    #[serde(rename = "nombreCompleto")]
    full_name: &'a str,
    #[serde(rename = "correo")]
    email: &'a str,
    password: &'a str,
    #[serde(rename = "telefono")]
    phone: &'a str,
    #[serde(rename = "direccion")]
    address: &'a str,
    #[serde(rename = "estado")]
    status: &'static str,
    #[serde(rename = "id_rol")]
    role_id: u8,
    role: Role,
}
