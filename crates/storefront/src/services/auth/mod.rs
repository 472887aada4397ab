//! Authentication service.
//!
//! Login and registration are delegated to the external backend; this
//! module validates the forms, translates backend answers, and records the
//! logged-in user in the visitor's store.

mod error;

pub use error::AuthError;

use la_reyna_backend::{BackendClient, NewUser};
use la_reyna_core::{Email, FieldErrors, Phone};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use crate::models::CurrentUser;
use crate::storage::{KeyValueStore, keys};

/// Message shown when the phone is not nine digits.
pub const PHONE_MESSAGE: &str = "El número de teléfono debe contener exactamente 9 dígitos numéricos";

/// Result of a successful login.
#[derive(Debug)]
pub struct LoginOutcome {
    pub user: CurrentUser,
    pub token: SecretString,
    /// Backend greeting, shown as an alert.
    pub message: String,
}

/// Registration form input after deserialization.
#[derive(Debug)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: SecretString,
    pub phone: String,
    pub address: String,
}

impl Registration {
    /// Validate the form into a backend user.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages if any field is invalid.
    pub fn validate(self) -> Result<NewUser, FieldErrors> {
        let mut errors = FieldErrors::new();

        let full_name = self.full_name.trim().to_string();
        if full_name.is_empty() {
            errors.insert("full_name", "El nombre es requerido");
        }
        let email = Email::parse(&self.email)
            .inspect_err(|_| errors.insert("email", "El formato de email no es válido"))
            .ok();
        if self.password.expose_secret().is_empty() {
            errors.insert("password", "La contraseña es requerida");
        }
        let phone = Phone::parse(&self.phone)
            .inspect_err(|_| errors.insert("phone", PHONE_MESSAGE))
            .ok();

        match (email, phone) {
            (Some(email), Some(phone)) if errors.is_empty() => Ok(NewUser::customer(
                full_name,
                email,
                self.password,
                phone,
                self.address.trim().to_string(),
            )),
            _ => Err(errors),
        }
    }
}

/// Authentication service.
pub struct AuthService<'a> {
    backend: &'a BackendClient,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(backend: &'a BackendClient) -> Self {
        Self { backend }
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Invalid` for blank fields, `AuthError::Rejected`
    /// with the backend's message for bad credentials, or
    /// `AuthError::Unavailable` if the backend cannot be reached.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginOutcome, AuthError> {
        let mut errors = FieldErrors::new();
        if email.trim().is_empty() {
            errors.insert("email", "El correo es requerido");
        }
        if password.expose_secret().is_empty() {
            errors.insert("password", "La contraseña es requerida");
        }
        errors.into_result(()).map_err(AuthError::Invalid)?;

        let response = self.backend.login(email.trim(), password).await?;
        tracing::info!(role = %response.data.role, "User logged in");

        Ok(LoginOutcome {
            user: CurrentUser::from(response.data),
            token: SecretString::from(response.token),
            message: response.message,
        })
    }

    /// Register a new customer account.
    ///
    /// Returns the backend's confirmation message.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Invalid` if the form fails validation, otherwise
    /// the backend's refusal or unavailability.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: Registration) -> Result<String, AuthError> {
        let user = registration.validate().map_err(AuthError::Invalid)?;
        let response = self.backend.create_user(&user).await?;
        tracing::info!("Customer registered");
        Ok(response.message)
    }
}

/// Record a logged-in user and their token.
///
/// Any saved checkout state is dropped so the checkout form is filled from
/// this user on its next visit.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub async fn set_current_user<S: KeyValueStore>(
    store: &S,
    outcome: &LoginOutcome,
) -> Result<(), AuthError> {
    store.save(keys::USER, &outcome.user).await?;
    store
        .save(keys::TOKEN, &outcome.token.expose_secret())
        .await?;
    store.remove(keys::CHECKOUT).await?;
    Ok(())
}

/// Forget the logged-in user, their token and any checkout state (logout).
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub async fn clear_current_user<S: KeyValueStore>(store: &S) -> Result<(), AuthError> {
    store.remove(keys::USER).await?;
    store.remove(keys::TOKEN).await?;
    store.remove(keys::CHECKOUT).await?;
    Ok(())
}
