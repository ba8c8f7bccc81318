//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! shilpini-cli admin create -e owner@shilpini.com -n "Owner" -p 'long-password' -r super_admin
//! ```

use thiserror::Error;

use shilpini_admin::db::{AdminRepository, RepositoryError};
use shilpini_admin::services::{PasswordError, hash_password};
use shilpini_core::AdminRole;

use super::{CommandError, connect};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Connect(#[from] CommandError),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: super_admin, admin, viewer")]
    InvalidRole(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Name left blank.
    #[error("Name is required")]
    MissingName,

    /// Password rejected or hashing failed.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Insert failed, including a taken email.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Check the arguments before touching the database.
fn validate(email: &str, name: &str, role: &str) -> Result<AdminRole, AdminError> {
    let role: AdminRole = role
        .parse()
        .map_err(|_| AdminError::InvalidRole(role.to_owned()))?;

    let email = email.trim();
    if !email.contains('@') || !email.contains('.') {
        return Err(AdminError::InvalidEmail(email.to_owned()));
    }
    if name.trim().is_empty() {
        return Err(AdminError::MissingName);
    }
    Ok(role)
}

/// Create a new admin account.
///
/// # Returns
///
/// The ID of the created admin.
///
/// # Errors
///
/// Returns an error if an argument is invalid, the email is taken or the
/// database is unreachable.
pub async fn create_user(
    email: &str,
    name: &str,
    password: &str,
    role: &str,
) -> Result<i32, AdminError> {
    let role = validate(email, name, role)?;
    let password_hash = hash_password(password)?;

    let pool = connect().await?;

    tracing::info!("Creating admin: {} ({})", email, role);
    let admin = AdminRepository::new(&pool)
        .create(email, name, &password_hash, role)
        .await?;

    tracing::info!(
        "Admin created successfully! ID: {}, Email: {}, Role: {}",
        admin.id,
        admin.email,
        admin.role
    );
    Ok(admin.id.as_i32())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_arguments() {
        assert!(matches!(
            validate("owner@shilpini.com", "Owner", "super_admin"),
            Ok(AdminRole::SuperAdmin)
        ));
        assert!(matches!(
            validate("owner@shilpini.com", "Owner", "root"),
            Err(AdminError::InvalidRole(_))
        ));
        assert!(matches!(
            validate("owner", "Owner", "admin"),
            Err(AdminError::InvalidEmail(_))
        ));
        assert!(matches!(
            validate("owner@shilpini.com", " ", "admin"),
            Err(AdminError::MissingName)
        ));
    }
}
