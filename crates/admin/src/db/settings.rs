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

    /// Current shipping rates, creating the row with defaults if missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    #[instrument(skip(self))]
    pub async fn shipping_rates(&self) -> Result<ShippingRates, RepositoryError> {
        let defaults = ShippingRates::default();
        let rates = sqlx::query_as(
            r"
            WITH created AS (
                INSERT INTO settings (id, inside_dhaka_shipping, outside_dhaka_shipping)
                VALUES ($1, $2, $3)
                ON CONFLICT (id) DO NOTHING
                RETURNING inside_dhaka_shipping, outside_dhaka_shipping
            )
            SELECT inside_dhaka_shipping, outside_dhaka_shipping FROM created
            UNION ALL
            SELECT inside_dhaka_shipping, outside_dhaka_shipping FROM settings WHERE id = $1
            LIMIT 1
            ",
        )
        .bind(SETTINGS_ID)
        .bind(defaults.inside)
        .bind(defaults.outside)
        .fetch_one(self.pool)
        .await?;
        Ok(rates)
    }

    /// Store new shipping rates, creating the row if missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    #[instrument(skip(self))]
    pub async fn update_shipping_rates(
        &self,
        rates: &ShippingRates,
    ) -> Result<ShippingRates, RepositoryError> {
        let rates = sqlx::query_as(
            r"
            INSERT INTO settings (id, inside_dhaka_shipping, outside_dhaka_shipping)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                inside_dhaka_shipping = EXCLUDED.inside_dhaka_shipping,
                outside_dhaka_shipping = EXCLUDED.outside_dhaka_shipping,
                updated_at = now()
            RETURNING inside_dhaka_shipping, outside_dhaka_shipping
            ",
        )
        .bind(SETTINGS_ID)
        .bind(rates.inside)
        .bind(rates.outside)
        .fetch_one(self.pool)
        .await?;
        Ok(rates)
    }
}
