//! Admin account repository.

use sqlx::PgPool;
use tracing::instrument;

use shilpini_core::{AdminId, AdminRole};

use super::RepositoryError;
use crate::models::Admin;

const ADMIN_COLUMNS: &str = "id, email, name, password_hash, role, created_at";

/// Repository for admin accounts.
pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up an admin by email, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Admin>, RepositoryError> {
        let sql = format!("SELECT {ADMIN_COLUMNS} FROM admin WHERE lower(email) = lower($1)");
        let admin = sqlx::query_as(&sql)
            .bind(email.trim())
            .fetch_optional(self.pool)
            .await?;
        Ok(admin)
    }

    /// Look up an admin by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError> {
        let sql = format!("SELECT {ADMIN_COLUMNS} FROM admin WHERE id = $1");
        let admin = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(admin)
    }

    /// Create an admin account from an already hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is taken.
    #[instrument(skip(self, password_hash))]
    pub async fn create(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
        role: AdminRole,
    ) -> Result<Admin, RepositoryError> {
        let sql = format!(
            "INSERT INTO admin (email, name, password_hash, role) \
             VALUES ($1, $2, $3, $4) RETURNING {ADMIN_COLUMNS}"
        );
        sqlx::query_as(&sql)
            .bind(email.trim().to_lowercase())
            .bind(name.trim())
            .bind(password_hash)
            .bind(role)
            .fetch_one(self.pool)
            .await
            .map_err(|e| RepositoryError::unique(e, "An admin with this email already exists"))
    }
}
