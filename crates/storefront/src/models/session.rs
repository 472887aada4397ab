//! Session-related types.
//!
//! Types stored in the session for authentication state.

use la_reyna_backend::BackendUser;
use la_reyna_core::Role;
use serde::{Deserialize, Serialize};

/// Session-stored user identity.
///
/// Written under the `user` key after a successful login and read by the
/// navigation bar, the checkout form and route guards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Name shown in the navigation bar.
    pub display_name: String,
    /// Email as the backend stores it.
    pub email: String,
    /// Phone number, when the backend has one.
    #[serde(default)]
    pub phone: Option<String>,
    /// Delivery address, when the backend has one.
    #[serde(default)]
    pub address: Option<String>,
    pub role: Role,
}

impl CurrentUser {
    /// First word of the display name, for the greeting.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.display_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.display_name)
    }

    /// Whether this user may open the back-office.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<BackendUser> for CurrentUser {
    fn from(user: BackendUser) -> Self {
        Self {
            display_name: user.full_name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            role: user.role,
        }
    }
}
