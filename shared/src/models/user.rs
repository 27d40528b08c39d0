//! User Model

use serde::{Deserialize, Serialize};

/// Role gates which screens and actions are available. No core
/// computation depends on it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    #[default]
    Staff,
}

impl Role {
    /// Admin and above may run destructive ledger operations and
    /// stock write-offs.
    pub fn is_admin(self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Option<String>,
    pub name: String,
    pub role: Role,
    pub is_active: bool,
}

/// Authenticated session, as returned by the session provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub role: Role,
}
