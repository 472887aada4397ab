//! Administrator account commands.
//!
//! # Usage
//!
//! ```bash
//! lr-cli admin seed
//! lr-cli admin seed -e jefa@lareyna.pe -p s3cret -n "Ana Reyna"
//! ```
//!
//! The backend has no lookup endpoint, so an existing account shows up as
//! a rejected create; seeding treats that as success.

use la_reyna_backend::{BackendClient, NewUser};
use la_reyna_core::{Email, Phone};
use secrecy::SecretString;

use super::CommandError;

pub const DEFAULT_EMAIL: &str = "admin@gmail.com";
pub const DEFAULT_PASSWORD: &str = "admin";
pub const DEFAULT_NAME: &str = "Administrador";
pub const DEFAULT_PHONE: &str = "999999999";
pub const DEFAULT_ADDRESS: &str = "Administración Central";

/// Arguments for `admin seed`.
pub struct AdminSeed {
    pub email: String,
    pub password: SecretString,
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// Outcome of a seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Created,
    AlreadyExists,
}

impl AdminSeed {
    /// Validate the arguments into a backend user with the admin role.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` if the email, phone or name is invalid.
    pub fn into_new_user(self) -> Result<NewUser, CommandError> {
        if self.name.trim().is_empty() {
            return Err(CommandError::Blank("name"));
        }
        Ok(NewUser::admin(
            self.name.trim().to_owned(),
            Email::parse(&self.email)?,
            self.password,
            Phone::parse(&self.phone)?,
            self.address,
        ))
    }
}

/// Create the administrator account.
///
/// # Errors
///
/// Returns `CommandError` for invalid arguments or an unreachable backend.
pub async fn seed(client: &BackendClient, seed: AdminSeed) -> Result<SeedOutcome, CommandError> {
    let user = seed.into_new_user()?;
    tracing::info!("Creating administrator: {}", user.email);

    match client.create_user(&user).await {
        Ok(response) => {
            tracing::info!("{}", response.message);
            Ok(SeedOutcome::Created)
        }
        Err(e) if e.is_rejection() => {
            tracing::info!("Administrator already exists ({})", e.user_message());
            Ok(SeedOutcome::AlreadyExists)
        }
        Err(e) => Err(e.into()),
    }
}
