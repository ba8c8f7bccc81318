//! Dashboard counters.

use serde::Serialize;
use sqlx::PgPool;
use tracing::instrument;

use super::RepositoryError;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub products: i64,
    pub categories: i64,
    pub orders: i64,
    pub pending_orders: i64,
    pub reviews: i64,
    pub pending_reviews: i64,
    pub sliders: i64,
}

/// Repository for dashboard reads.
pub struct DashboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DashboardRepository<'a> {
    /// Create a new dashboard repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All counters in one round trip.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats, RepositoryError> {
        let stats = sqlx::query_as(
            r"
            SELECT
                (SELECT COUNT(*) FROM product) AS products,
                (SELECT COUNT(*) FROM category) AS categories,
                (SELECT COUNT(*) FROM orders) AS orders,
                (SELECT COUNT(*) FROM orders WHERE status = 'PENDING') AS pending_orders,
                (SELECT COUNT(*) FROM review) AS reviews,
                (SELECT COUNT(*) FROM review WHERE NOT is_approved) AS pending_reviews,
                (SELECT COUNT(*) FROM slider_content) AS sliders
            ",
        )
        .fetch_one(self.pool)
        .await?;
        Ok(stats)
    }
}
