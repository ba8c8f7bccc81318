//! Catalog repository: products, option groups and categories.
//!
//! The storefront only ever sees active products and active categories.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use shilpini_core::{Category, CategoryId, CategoryRef, Product, ProductCollection, ProductId, ProductOption};

use super::RepositoryError;

/// Products per listing page.
pub const PAGE_SIZE: i64 = 20;

const PRODUCT_COLUMNS: &str = "p.id, p.name, p.description, p.price, p.compare_price, p.sku, \
     p.stock, p.category_id, p.tags, p.featured_image, p.images, p.is_active, p.is_featured, \
     p.collections, p.sort_order, p.created_at, p.updated_at";

const SUMMARY_COLUMNS: &str = "p.id, p.name, p.price, p.compare_price, p.featured_image, \
     p.stock, p.category_id, c.name AS category_name, c.slug AS category_slug";

const CATEGORY_COLUMNS: &str =
    "id, name, slug, description, image, is_active, sort_order, created_at";

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
}

impl ProductSort {
    const fn order_by(self) -> &'static str {
        match self {
            Self::Newest => " ORDER BY p.created_at DESC, p.id DESC",
            Self::Oldest => " ORDER BY p.created_at ASC, p.id ASC",
            Self::PriceAsc => " ORDER BY p.price ASC, p.id ASC",
            Self::PriceDesc => " ORDER BY p.price DESC, p.id DESC",
        }
    }
}

impl FromStr for ProductSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            _ => Err(format!("invalid sort: {s}")),
        }
    }
}

/// Listing filters. All present filters must match.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<CategoryId>,
    pub collection: Option<ProductCollection>,
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
    pub sort: ProductSort,
    pub skip: i64,
}

/// Product card data for listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub compare_price: Option<Decimal>,
    pub featured_image: Option<String>,
    pub stock: i32,
    pub category: Option<CategoryRef>,
}

/// One page of a product listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<ProductSummary>,
    pub total: i64,
    pub has_more: bool,
}

/// An active category with its number of active products.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub product_count: i64,
}

#[derive(sqlx::FromRow)]
struct ProductSummaryRow {
    id: ProductId,
    name: String,
    price: Decimal,
    compare_price: Option<Decimal>,
    featured_image: Option<String>,
    stock: i32,
    category_id: Option<CategoryId>,
    category_name: Option<String>,
    category_slug: Option<String>,
}

impl From<ProductSummaryRow> for ProductSummary {
    fn from(row: ProductSummaryRow) -> Self {
        let category = match (row.category_id, row.category_name, row.category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(CategoryRef { id, name, slug }),
            _ => None,
        };
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            compare_price: row.compare_price,
            featured_image: row.featured_image,
            stock: row.stock,
            category,
        }
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside `ILIKE`.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    qb.push(" WHERE p.is_active");
    if let Some(category_id) = filter.category_id {
        qb.push(" AND p.category_id = ").push_bind(category_id);
    }
    if let Some(collection) = filter.collection {
        qb.push(" AND ")
            .push_bind(collection)
            .push(" = ANY(p.collections)");
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        qb.push(" AND p.name ILIKE ")
            .push_bind(format!("%{}%", escape_like(search)));
    }
}

/// Repository for catalog reads.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List one page of active products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: &ProductFilter) -> Result<ProductPage, RepositoryError> {
        let skip = filter.skip.max(0);

        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM product p");
        push_filters(&mut count_qb, filter);
        let total: i64 = count_qb.build_query_scalar().fetch_one(self.pool).await?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
        qb.push(SUMMARY_COLUMNS)
            .push(" FROM product p LEFT JOIN category c ON c.id = p.category_id");
        push_filters(&mut qb, filter);
        qb.push(filter.sort.order_by())
            .push(" OFFSET ")
            .push_bind(skip)
            .push(" LIMIT ")
            .push_bind(PAGE_SIZE);

        let rows: Vec<ProductSummaryRow> = qb.build_query_as().fetch_all(self.pool).await?;

        Ok(ProductPage {
            products: rows.into_iter().map(ProductSummary::from).collect(),
            total,
            has_more: skip + PAGE_SIZE < total,
        })
    }

    /// Get an active product with its option groups.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    #[instrument(skip(self))]
    pub async fn get_active_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM product p WHERE p.id = $1 AND p.is_active");
        let product: Option<Product> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        let Some(mut product) = product else {
            return Ok(None);
        };
        product.options = self.product_options(id).await?;
        Ok(Some(product))
    }

    /// Option groups of a product, in the order the admin defined them.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn product_options(&self, id: ProductId) -> Result<Vec<ProductOption>, RepositoryError> {
        let options = sqlx::query_as(
            "SELECT name, option_values FROM product_option WHERE product_id = $1 ORDER BY position, id",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;
        Ok(options)
    }

    /// Get a category by id, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM category WHERE id = $1");
        let category = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(category)
    }

    /// Newest active products in the same category, excluding `exclude`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn related_products(
        &self,
        category_id: CategoryId,
        exclude: ProductId,
        take: i64,
    ) -> Result<Vec<ProductSummary>, RepositoryError> {
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} FROM product p \
             LEFT JOIN category c ON c.id = p.category_id \
             WHERE p.is_active AND p.category_id = $1 AND p.id <> $2 \
             ORDER BY p.created_at DESC, p.id DESC LIMIT $3"
        );
        let rows: Vec<ProductSummaryRow> = sqlx::query_as(&sql)
            .bind(category_id)
            .bind(exclude)
            .bind(take)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(ProductSummary::from).collect())
    }

    /// Active categories in display order with their active product counts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn active_categories(&self) -> Result<Vec<CategoryWithCount>, RepositoryError> {
        let categories = sqlx::query_as(
            r"
            SELECT c.id, c.name, c.slug, c.image,
                   COUNT(p.id) FILTER (WHERE p.is_active) AS product_count
            FROM category c
            LEFT JOIN product p ON p.category_id = c.id
            WHERE c.is_active
            GROUP BY c.id
            ORDER BY c.sort_order ASC, c.created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(categories)
    }

    /// The first `take` active categories for the home page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn home_categories(&self, take: i64) -> Result<Vec<Category>, RepositoryError> {
        let sql = format!(
            "SELECT {CATEGORY_COLUMNS} FROM category WHERE is_active \
             ORDER BY sort_order ASC, created_at DESC LIMIT $1"
        );
        let categories = sqlx::query_as(&sql)
            .bind(take)
            .fetch_all(self.pool)
            .await?;
        Ok(categories)
    }
}
