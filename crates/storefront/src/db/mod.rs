//! Database operations for the storefront.
//!
//! # Database: `shilpini`
//!
//! Shared with the admin binary. The storefront reads the catalog and
//! content tables and writes orders.
//!
//! ## Tables
//!
//! - `category`, `product`, `product_option` - Catalog
//! - `review`, `slider_content` - Storefront content
//! - `orders`, `order_item` - Placed orders with item snapshots
//! - `counter` - Named counters (`order_number`)
//! - `settings` - Singleton shipping rates, `id = 'default'`
//! - `tower_sessions.session` - Session storage (carts live here)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p shilpini-cli -- migrate
//! ```

pub mod catalog;
pub mod content;
pub mod orders;
pub mod settings;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use catalog::{CatalogRepository, ProductFilter, ProductSort};
pub use content::ContentRepository;
pub use orders::{OrderRepository, PlacedOrder};
pub use settings::SettingsRepository;

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
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
