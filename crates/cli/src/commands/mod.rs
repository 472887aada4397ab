//! Subcommand implementations.

pub mod admin;
pub mod catalog;
pub mod user;

use la_reyna_backend::BackendError;
use la_reyna_core::{EmailError, PhoneError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The email argument is not a valid address.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The phone argument is not a valid phone number.
    #[error("Invalid phone: {0}")]
    InvalidPhone(#[from] PhoneError),

    /// A required text argument was blank.
    #[error("{0} cannot be empty")]
    Blank(&'static str),

    /// The backend refused the request or could not be reached.
    #[error("{}", .0.user_message())]
    Backend(#[from] BackendError),
}
