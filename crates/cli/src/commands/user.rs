//! Customer account commands.

use la_reyna_backend::{BackendClient, NewUser};
use la_reyna_core::{Email, Phone};
use secrecy::SecretString;

use super::CommandError;

/// Arguments for `user register`.
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub phone: String,
    pub address: String,
}

/// Register a customer account.
///
/// Unlike `admin seed`, a backend rejection (e.g. the email is taken) is
/// reported as a failure.
///
/// # Errors
///
/// Returns `CommandError` for invalid arguments or a backend failure.
pub async fn register(client: &BackendClient, registration: Registration) -> Result<(), CommandError> {
    if registration.name.trim().is_empty() {
        return Err(CommandError::Blank("name"));
    }
    let user = NewUser::customer(
        registration.name.trim().to_owned(),
        Email::parse(&registration.email)?,
        registration.password,
        Phone::parse(&registration.phone)?,
        registration.address,
    );

    let response = client.create_user(&user).await?;
    tracing::info!("{} ({})", response.message, user.email);
    Ok(())
}
