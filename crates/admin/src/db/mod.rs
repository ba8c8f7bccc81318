//! Database operations for the back office.
//!
//! # Database: `shilpini`
//!
//! The admin binary shares one database with the storefront and owns every
//! write except order creation.
//!
//! ## Tables
//!
//! - `admin` - Back-office accounts (argon2 password hashes)
//! - `category`, `product`, `product_option` - Catalog
//! - `orders`, `order_item` - Orders placed by the storefront
//! - `review`, `slider_content` - Storefront content
//! - `settings` - Singleton shipping rates, `id = 'default'`
//! - `tower_sessions.session` - Session storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p shilpini-cli -- migrate
//! ```

pub mod admins;
pub mod categories;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod settings;
pub mod sliders;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admins::AdminRepository;
pub use categories::CategoryRepository;
pub use dashboard::{DashboardRepository, DashboardStats};
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use reviews::ReviewRepository;
pub use settings::SettingsRepository;
pub use sliders::SliderRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique slug).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a unique violation to `Conflict(message)`; anything else stays a
    /// database error.
    pub(crate) fn unique(err: sqlx::Error, message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(message.to_owned());
        }
        Self::Database(err)
    }
}

/// Turn a zero-row write into `NotFound`.
pub(crate) const fn affected(rows: u64) -> Result<(), RepositoryError> {
    if rows == 0 {
        Err(RepositoryError::NotFound)
    } else {
        Ok(())
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside `ILIKE`.
pub(crate) fn like_pattern(input: &str) -> String {
    let mut pattern = String::with_capacity(input.len() + 2);
    pattern.push('%');
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("SHILP10"), "%SHILP10%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn test_affected() {
        assert!(affected(1).is_ok());
        assert!(matches!(affected(0), Err(RepositoryError::NotFound)));
    }

    #[test]
    fn test_non_unique_error_stays_database() {
        let err = RepositoryError::unique(sqlx::Error::RowNotFound, "duplicate");
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}
