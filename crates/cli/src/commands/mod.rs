//! CLI subcommands.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Variables checked for the connection string, in order.
const DATABASE_URL_VARS: [&str; 3] = ["DATABASE_URL", "ADMIN_DATABASE_URL", "STOREFRONT_DATABASE_URL"];

/// Errors shared by every command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// No connection string in the environment.
    #[error("Missing environment variable: DATABASE_URL")]
    MissingDatabaseUrl,

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Connect using the first database URL found in the environment.
///
/// # Errors
///
/// Returns an error if no URL is set or the connection fails.
pub async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = DATABASE_URL_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .map(SecretString::from)
        .ok_or(CommandError::MissingDatabaseUrl)?;

    tracing::info!("Connecting to database...");
    Ok(shilpini_admin::db::create_pool(&database_url).await?)
}
