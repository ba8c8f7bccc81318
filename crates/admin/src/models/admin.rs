//! Admin account domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shilpini_core::AdminId;

pub use shilpini_core::AdminRole;

/// An admin account as loaded for authentication.
///
/// The password hash never leaves the server; handlers respond with
/// [`AdminProfile`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Admin {
    pub id: AdminId,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
}

/// Public view of an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminProfile {
    pub id: AdminId,
    pub email: String,
    pub name: String,
    pub role: AdminRole,
}

impl From<&Admin> for AdminProfile {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email.clone(),
            name: admin.name.clone(),
            role: admin.role,
        }
    }
}
