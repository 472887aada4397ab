//! Authentication extractors.
//!
//! The storefront has no pages that require login: checkout works for
//! guests too. These extractors read the current user (and cart size for
//! the header) from the session without rejecting the request.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::cart::Cart;
use crate::models::CurrentUser;
use crate::storage::{KeyValueStore, StorageError, keys};

/// Extractor that optionally gets the current user.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hola, {}!", u.first_name()),
///         None => "Hola!".to_string(),
///     }
/// }
/// ```
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => current_user(session).await,
            None => None,
        };

        Ok(Self(user))
    }
}

/// Header data every full page renders: who is logged in, how many
/// units are in the bag, and any pending alert.
///
/// Extracting `Nav` consumes the flash message.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    pub user_name: Option<String>,
    pub is_admin: bool,
    pub cart_count: u32,
    pub flash: Option<String>,
}

impl<S> FromRequestParts<S> for Nav
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(session) = parts.extensions.get::<Session>() else {
            return Ok(Self::default());
        };

        let user = current_user(session).await;
        // Session has an inherent `load`, so call through the trait
        let cart_count = match KeyValueStore::load::<Cart>(session, keys::CART).await {
            Ok(cart) => cart.map_or(0, |c| c.count()),
            Err(e) => {
                tracing::warn!("Failed to read cart for header: {e}");
                0
            }
        };

        Ok(Self {
            user_name: user.as_ref().map(|u| u.first_name().to_string()),
            is_admin: user.as_ref().is_some_and(CurrentUser::is_admin),
            cart_count,
            flash: take_flash(session).await,
        })
    }
}

/// Queue an alert for the next full page.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub async fn set_flash(session: &Session, message: &str) -> Result<(), StorageError> {
    KeyValueStore::save(session, keys::FLASH, &message).await
}

async fn take_flash(session: &Session) -> Option<String> {
    let message = KeyValueStore::load::<String>(session, keys::FLASH)
        .await
        .ok()
        .flatten()?;
    if let Err(e) = KeyValueStore::remove(session, keys::FLASH).await {
        tracing::warn!("Failed to clear flash message: {e}");
    }
    Some(message)
}

async fn current_user(session: &Session) -> Option<CurrentUser> {
    KeyValueStore::load::<CurrentUser>(session, keys::USER)
        .await
        .ok()
        .flatten()
}
