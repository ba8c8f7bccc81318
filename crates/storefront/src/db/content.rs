//! Reviews and hero slides shown on the storefront.

use sqlx::PgPool;
use tracing::instrument;

use shilpini_core::{ProductId, Review, SliderContent};

use super::RepositoryError;

const REVIEW_COLUMNS: &str = "id, product_id, user_name, user_email, rating, comment, image, \
     screenshot_image, source, is_showcase, is_approved, created_at";

const SLIDER_COLUMNS: &str =
    "id, title, description, image, phone_image, link, button_text, is_active, sort_order, created_at";

/// Repository for storefront content reads.
pub struct ContentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContentRepository<'a> {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Approved reviews of a product, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn approved_reviews(
        &self,
        product_id: ProductId,
        take: i64,
    ) -> Result<Vec<Review>, RepositoryError> {
        let sql = format!(
            "SELECT {REVIEW_COLUMNS} FROM review \
             WHERE product_id = $1 AND is_approved \
             ORDER BY created_at DESC LIMIT $2"
        );
        let reviews = sqlx::query_as(&sql)
            .bind(product_id)
            .bind(take)
            .fetch_all(self.pool)
            .await?;
        Ok(reviews)
    }

    /// Approved showcase reviews: those with a screenshot first, then newest.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn showcase_reviews(&self, take: i64) -> Result<Vec<Review>, RepositoryError> {
        let sql = format!(
            "SELECT {REVIEW_COLUMNS} FROM review \
             WHERE is_showcase AND is_approved \
             ORDER BY screenshot_image DESC NULLS LAST, created_at DESC LIMIT $1"
        );
        let reviews = sqlx::query_as(&sql)
            .bind(take)
            .fetch_all(self.pool)
            .await?;
        Ok(reviews)
    }

    /// Active hero slides in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn active_sliders(&self) -> Result<Vec<SliderContent>, RepositoryError> {
        let sql = format!(
            "SELECT {SLIDER_COLUMNS} FROM slider_content WHERE is_active \
             ORDER BY sort_order ASC, created_at DESC"
        );
        let slides = sqlx::query_as(&sql).fetch_all(self.pool).await?;
        Ok(slides)
    }
}
