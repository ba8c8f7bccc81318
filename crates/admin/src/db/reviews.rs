//! Review repository for moderation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::instrument;

use shilpini_core::{ProductId, Review, ReviewId};

use super::{RepositoryError, affected};
use crate::models::form::ReviewInput;

const REVIEW_COLUMNS: &str = "id, product_id, user_name, user_email, rating, comment, image, \
     screenshot_image, source, is_showcase, is_approved, created_at";

/// Review row for the moderation table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReviewListItem {
    pub id: ReviewId,
    pub product_id: Option<ProductId>,
    pub product_name: Option<String>,
    pub user_name: String,
    pub rating: i16,
    pub comment: String,
    pub screenshot_image: Option<String>,
    pub is_showcase: bool,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Repository for review moderation.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All reviews, newest first, with the reviewed product's name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ReviewListItem>, RepositoryError> {
        let reviews = sqlx::query_as(
            r"
            SELECT r.id, r.product_id, p.name AS product_name, r.user_name, r.rating,
                   r.comment, r.screenshot_image, r.is_showcase, r.is_approved, r.created_at
            FROM review r
            LEFT JOIN product p ON p.id = r.product_id
            ORDER BY r.created_at DESC, r.id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(reviews)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no review has this id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: ReviewId) -> Result<Review, RepositoryError> {
        let sql = format!("SELECT {REVIEW_COLUMNS} FROM review WHERE id = $1");
        sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &ReviewInput) -> Result<Review, RepositoryError> {
        let sql = format!(
            "INSERT INTO review (product_id, user_name, user_email, rating, comment, image, \
             screenshot_image, source, is_showcase, is_approved) \
             VALUES ((SELECT id FROM product WHERE id = $1), $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {REVIEW_COLUMNS}"
        );
        let review = sqlx::query_as(&sql)
            .bind(input.product_id)
            .bind(&input.user_name)
            .bind(input.user_email.as_deref())
            .bind(input.rating)
            .bind(&input.comment)
            .bind(input.image.as_deref())
            .bind(input.screenshot_image.as_deref())
            .bind(input.source.as_deref())
            .bind(input.is_showcase)
            .bind(input.is_approved)
            .fetch_one(self.pool)
            .await?;
        Ok(review)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no review has this id.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: ReviewId, input: &ReviewInput) -> Result<Review, RepositoryError> {
        let sql = format!(
            "UPDATE review SET product_id = (SELECT id FROM product WHERE id = $2), \
             user_name = $3, user_email = $4, rating = $5, comment = $6, image = $7, \
             screenshot_image = $8, source = $9, is_showcase = $10, is_approved = $11 \
             WHERE id = $1 RETURNING {REVIEW_COLUMNS}"
        );
        sqlx::query_as(&sql)
            .bind(id)
            .bind(input.product_id)
            .bind(&input.user_name)
            .bind(input.user_email.as_deref())
            .bind(input.rating)
            .bind(&input.comment)
            .bind(input.image.as_deref())
            .bind(input.screenshot_image.as_deref())
            .bind(input.source.as_deref())
            .bind(input.is_showcase)
            .bind(input.is_approved)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Flip the approval flag and return the new value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no review has this id.
    #[instrument(skip(self))]
    pub async fn toggle_approval(&self, id: ReviewId) -> Result<bool, RepositoryError> {
        sqlx::query_scalar(
            "UPDATE review SET is_approved = NOT is_approved WHERE id = $1 RETURNING is_approved",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no review has this id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ReviewId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM review WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        affected(result.rows_affected())
    }
}
