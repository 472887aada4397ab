//! User roles issued by the backend.

use serde::{Deserialize, Serialize};

/// Role attached to a logged-in user.
///
/// Serialized with the backend's wire names (`USER`, `ADMIN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Shop customer.
    #[default]
    User,
    /// Back-office administrator.
    Admin,
}

impl Role {
    /// Backend wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    /// Backend numeric role id (`id_rol`).
    #[must_use]
    pub const fn backend_id(self) -> u8 {
        match self {
            Self::Admin => 1,
            Self::User => 2,
        }
    }

    /// Whether this role may use the back-office.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}
