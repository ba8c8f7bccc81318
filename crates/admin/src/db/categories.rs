//! Category repository.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::instrument;

use shilpini_core::{Category, CategoryId};

use super::{RepositoryError, affected};
use crate::models::form::CategoryInput;

const CATEGORY_COLUMNS: &str =
    "id, name, slug, description, image, is_active, sort_order, created_at";

const SLUG_TAKEN: &str = "A category with this slug already exists";

/// A category with the number of products assigned to it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListItem {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub product_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Repository for category writes and admin listings.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All categories in display order with product counts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CategoryListItem>, RepositoryError> {
        let categories = sqlx::query_as(
            r"
            SELECT c.id, c.name, c.slug, c.image, c.is_active, c.sort_order,
                   COUNT(p.id) AS product_count, c.created_at
            FROM category c
            LEFT JOIN product p ON p.category_id = c.id
            GROUP BY c.id
            ORDER BY c.sort_order ASC, c.created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(categories)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no category has this id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: CategoryId) -> Result<Category, RepositoryError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM category WHERE id = $1");
        sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Look up a category by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>, RepositoryError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM category WHERE slug = $1");
        let category = sqlx::query_as(&sql)
            .bind(slug)
            .fetch_optional(self.pool)
            .await?;
        Ok(category)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is taken.
    #[instrument(skip(self, input), fields(slug = %input.slug))]
    pub async fn create(&self, input: &CategoryInput) -> Result<Category, RepositoryError> {
        let sql = format!(
            "INSERT INTO category (name, slug, description, image, is_active, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as(&sql)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.description.as_deref())
            .bind(input.image.as_deref())
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_one(self.pool)
            .await
            .map_err(|e| RepositoryError::unique(e, SLUG_TAKEN))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no category has this id, or
    /// `RepositoryError::Conflict` if the slug is taken by another category.
    #[instrument(skip(self, input), fields(slug = %input.slug))]
    pub async fn update(
        &self,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<Category, RepositoryError> {
        let sql = format!(
            "UPDATE category SET name = $2, slug = $3, description = $4, image = $5, \
             is_active = $6, sort_order = $7 WHERE id = $1 RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.description.as_deref())
            .bind(input.image.as_deref())
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| RepositoryError::unique(e, SLUG_TAKEN))?
            .ok_or(RepositoryError::NotFound)
    }

    /// Flip the active flag and return the new value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no category has this id.
    #[instrument(skip(self))]
    pub async fn toggle_active(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        sqlx::query_scalar("UPDATE category SET is_active = NOT is_active WHERE id = $1 RETURNING is_active")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete a category. Its products stay and become uncategorized.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no category has this id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: CategoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        affected(result.rows_affected())
    }
}
