//! Product repository: products and their option groups.
//!
//! Option groups belong to the product row. Create and update write the
//! product and its groups in one transaction, so a product is never left
//! with half of a new option set.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use shilpini_core::{CategoryId, Product, ProductId, ProductOption};

use super::{RepositoryError, affected, like_pattern};
use crate::models::form::ProductInput;

const PRODUCT_COLUMNS: &str = "id, name, description, price, compare_price, sku, stock, \
     category_id, tags, featured_image, images, is_active, is_featured, collections, \
     sort_order, created_at, updated_at";

const SKU_TAKEN: &str = "A product with this SKU already exists";

/// Product row for the admin product table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductListItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub compare_price: Option<Decimal>,
    pub sku: Option<String>,
    pub stock: i32,
    pub featured_image: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Category choice for the product form's select box.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CategoryChoice {
    pub id: CategoryId,
    pub name: String,
}

/// Repository for product writes and admin listings.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All products, newest first, optionally filtered by a name substring.
    /// Inactive products are included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<ProductListItem>, RepositoryError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT p.id, p.name, p.price, p.compare_price, p.sku, p.stock, p.featured_image, \
             p.is_active, p.is_featured, c.name AS category_name, p.created_at \
             FROM product p LEFT JOIN category c ON c.id = p.category_id",
        );
        if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
            qb.push(" WHERE p.name ILIKE ").push_bind(like_pattern(search));
        }
        qb.push(" ORDER BY p.created_at DESC, p.id DESC");

        let products = qb.build_query_as().fetch_all(self.pool).await?;
        Ok(products)
    }

    /// A product with its option groups.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1");
        let mut product: Product = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        product.options = sqlx::query_as(
            "SELECT name, option_values FROM product_option WHERE product_id = $1 ORDER BY position, id",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;
        Ok(product)
    }

    /// Insert a product with its option groups.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the SKU is taken.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &ProductInput) -> Result<ProductId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let id: ProductId = sqlx::query_scalar(
            r"
            INSERT INTO product (
                name, description, price, compare_price, sku, stock, category_id, tags,
                featured_image, images, is_active, is_featured, collections, sort_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id
            ",
        )
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.price)
        .bind(input.compare_price)
        .bind(input.sku.as_deref())
        .bind(input.stock)
        .bind(input.category_id)
        .bind(&input.tags)
        .bind(input.featured_image.as_deref())
        .bind(&input.images)
        .bind(input.is_active)
        .bind(input.is_featured)
        .bind(&input.collections)
        .bind(input.sort_order)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepositoryError::unique(e, SKU_TAKEN))?;

        if let Some(options) = &input.options {
            replace_options(&mut tx, id, options).await?;
        }

        tx.commit().await?;
        Ok(id)
    }

    /// Overwrite a product. Option groups are replaced wholesale when the
    /// input carries them and left alone otherwise.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id, or
    /// `RepositoryError::Conflict` if the SKU is taken.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: ProductId, input: &ProductInput) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"
            UPDATE product SET
                name = $2, description = $3, price = $4, compare_price = $5, sku = $6,
                stock = $7, category_id = $8, tags = $9, featured_image = $10, images = $11,
                is_active = $12, is_featured = $13, collections = $14, sort_order = $15,
                updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.price)
        .bind(input.compare_price)
        .bind(input.sku.as_deref())
        .bind(input.stock)
        .bind(input.category_id)
        .bind(&input.tags)
        .bind(input.featured_image.as_deref())
        .bind(&input.images)
        .bind(input.is_active)
        .bind(input.is_featured)
        .bind(&input.collections)
        .bind(input.sort_order)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::unique(e, SKU_TAKEN))?;
        affected(result.rows_affected())?;

        if let Some(options) = &input.options {
            replace_options(&mut tx, id, options).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete a product. Its option groups go with it; order items and
    /// reviews keep their snapshot and lose the reference.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        affected(result.rows_affected())
    }

    /// Every category, for the product form.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn category_choices(&self) -> Result<Vec<CategoryChoice>, RepositoryError> {
        let choices = sqlx::query_as("SELECT id, name FROM category ORDER BY sort_order, name")
            .fetch_all(self.pool)
            .await?;
        Ok(choices)
    }
}

async fn replace_options(
    conn: &mut PgConnection,
    product_id: ProductId,
    options: &[ProductOption],
) -> Result<(), RepositoryError> {
    sqlx::query("DELETE FROM product_option WHERE product_id = $1")
        .bind(product_id)
        .execute(&mut *conn)
        .await?;

    for (position, option) in options.iter().enumerate() {
        let position = i32::try_from(position)
            .map_err(|_| RepositoryError::DataCorruption("too many option groups".to_owned()))?;
        sqlx::query(
            "INSERT INTO product_option (product_id, name, option_values, position) VALUES ($1, $2, $3, $4)",
        )
        .bind(product_id)
        .bind(&option.name)
        .bind(&option.values)
        .bind(position)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
