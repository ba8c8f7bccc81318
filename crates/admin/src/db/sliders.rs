//! Hero slider repository.

use sqlx::PgPool;
use tracing::instrument;

use shilpini_core::{SliderContent, SliderId};

use super::{RepositoryError, affected};
use crate::models::form::SliderInput;

const SLIDER_COLUMNS: &str =
    "id, title, description, image, phone_image, link, button_text, is_active, sort_order, created_at";

/// Repository for hero slides.
pub struct SliderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SliderRepository<'a> {
    /// Create a new slider repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All slides in display order, inactive included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<SliderContent>, RepositoryError> {
        let sql = format!(
            "SELECT {SLIDER_COLUMNS} FROM slider_content ORDER BY sort_order ASC, created_at DESC"
        );
        let slides = sqlx::query_as(&sql).fetch_all(self.pool).await?;
        Ok(slides)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no slide has this id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: SliderId) -> Result<SliderContent, RepositoryError> {
        let sql = format!("SELECT {SLIDER_COLUMNS} FROM slider_content WHERE id = $1");
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
    pub async fn create(&self, input: &SliderInput) -> Result<SliderContent, RepositoryError> {
        let sql = format!(
            "INSERT INTO slider_content \
             (title, description, image, phone_image, link, button_text, is_active, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {SLIDER_COLUMNS}"
        );
        let slide = sqlx::query_as(&sql)
            .bind(input.title.as_deref())
            .bind(input.description.as_deref())
            .bind(&input.image)
            .bind(input.phone_image.as_deref())
            .bind(input.link.as_deref())
            .bind(input.button_text.as_deref())
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_one(self.pool)
            .await?;
        Ok(slide)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no slide has this id.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: SliderId,
        input: &SliderInput,
    ) -> Result<SliderContent, RepositoryError> {
        let sql = format!(
            "UPDATE slider_content SET title = $2, description = $3, image = $4, \
             phone_image = $5, link = $6, button_text = $7, is_active = $8, sort_order = $9 \
             WHERE id = $1 RETURNING {SLIDER_COLUMNS}"
        );
        sqlx::query_as(&sql)
            .bind(id)
            .bind(input.title.as_deref())
            .bind(input.description.as_deref())
            .bind(&input.image)
            .bind(input.phone_image.as_deref())
            .bind(input.link.as_deref())
            .bind(input.button_text.as_deref())
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no slide has this id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: SliderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM slider_content WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        affected(result.rows_affected())
    }
}
