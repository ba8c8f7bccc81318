//! Shop settings singleton.

use sqlx::PgPool;
use tracing::instrument;

use shilpini_core::ShippingRates;

use super::RepositoryError;

/// Primary key of the only settings row.
pub const SETTINGS_ID: &str = "default";

/// Repository for the settings row.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Current shipping rates, creating the row with default rates on first
    /// access.
    ///
    /// The insert is a no-op when the row exists, so concurrent first calls
    /// all read the same single row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    #[instrument(skip(self))]
    pub async fn shipping_rates(&self) -> Result<ShippingRates, RepositoryError> {
        let defaults = ShippingRates::default();
        sqlx::query(
            r"
            INSERT INTO settings (id, inside_dhaka_shipping, outside_dhaka_shipping)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO NOTHING
            ",
        )
        .bind(SETTINGS_ID)
        .bind(defaults.inside)
        .bind(defaults.outside)
        .execute(self.pool)
        .await?;

        let rates = sqlx::query_as(
            "SELECT inside_dhaka_shipping, outside_dhaka_shipping FROM settings WHERE id = $1",
        )
        .bind(SETTINGS_ID)
        .fetch_one(self.pool)
        .await?;
        Ok(rates)
    }
}
