//! Session-related types for admin authentication.

use la_reyna_backend::BackendUser;
use la_reyna_core::Role;
use serde::{Deserialize, Serialize};

/// Session-stored admin identity.
///
/// Minimal data stored in the session to identify the logged-in admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's display name.
    pub name: String,
    /// Admin's email address, as the backend stores it.
    pub email: String,
    pub role: Role,
}

impl From<BackendUser> for CurrentAdmin {
    fn from(user: BackendUser) -> Self {
        Self {
            name: user.full_name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Session keys for admin state.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// One-shot alert shown on the next page.
    pub const FLASH: &str = "flash";
}
