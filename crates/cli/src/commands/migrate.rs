//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! shilpini-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `ADMIN_DATABASE_URL`, then `STOREFRONT_DATABASE_URL`)
//!
//! # Migration Files
//!
//! The shop schema lives in `crates/storefront/migrations/` and is embedded
//! at compile time. The session table used by both binaries is created by
//! `tower-sessions-sqlx-store`.

use thiserror::Error;
use tower_sessions_sqlx_store::PostgresStore;

use super::{CommandError, connect};

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    Connect(#[from] CommandError),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Session table migration error: {0}")]
    Sessions(#[from] sqlx::Error),
}

/// Apply pending migrations.
///
/// # Errors
///
/// Returns an error if the connection or any migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let pool = connect().await?;

    tracing::info!("Running shop migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    tracing::info!("Creating session table...");
    PostgresStore::new(pool.clone()).migrate().await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
