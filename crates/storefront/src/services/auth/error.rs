//! Authentication error types.

use la_reyna_backend::BackendError;
use la_reyna_core::FieldErrors;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during login and registration.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The form failed validation; nothing was sent to the backend.
    #[error("invalid form: {0}")]
    Invalid(FieldErrors),

    /// The backend refused the credentials or the new account.
    #[error("rejected by backend: {0}")]
    Rejected(String),

    /// The backend could not be reached or answered garbage.
    #[error("backend unavailable: {0}")]
    Unavailable(#[source] BackendError),

    /// The session could not be updated.
    #[error("session error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Alert text for the login page.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid(errors) => errors
                .iter()
                .next()
                .map_or_else(String::new, |(_, message)| message.to_string()),
            Self::Rejected(message) => message.clone(),
            Self::Unavailable(_) => "Error al conectar con el servidor".to_string(),
            Self::Storage(_) => "No se pudo iniciar la sesión".to_string(),
        }
    }
}

impl From<BackendError> for AuthError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Rejected { message, .. } if !message.is_empty() => Self::Rejected(message),
            other => Self::Unavailable(other),
        }
    }
}
