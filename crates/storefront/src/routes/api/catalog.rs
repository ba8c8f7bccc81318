//! Product and category endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shilpini_core::{Category, CategoryId, CategoryRef, Product, ProductCollection, ProductId, Review};

use crate::db::catalog::{CategoryWithCount, ProductPage, ProductSummary};
use crate::db::{CatalogRepository, ContentRepository, ProductFilter, ProductSort};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Approved reviews shown on a product page.
const PRODUCT_REVIEWS: i64 = 20;

/// Related products shown on a product page.
const RELATED_PRODUCTS: i64 = 4;

/// Default number of home page categories.
const DEFAULT_HOME_CATEGORIES: i64 = 6;

/// Query string of the product listing, validated into a [`ProductFilter`].
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub collection: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub skip: Option<String>,
}

impl ProductListQuery {
    fn into_filter(self) -> std::result::Result<ProductFilter, String> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let category_id = non_empty(self.category)
            .map(|c| {
                c.trim()
                    .parse::<i32>()
                    .map(CategoryId::new)
                    .map_err(|_| format!("invalid category: {c}"))
            })
            .transpose()?;
        let collection = non_empty(self.collection)
            .map(|c| c.trim().parse::<ProductCollection>())
            .transpose()?;
        let sort = non_empty(self.sort)
            .map(|s| s.trim().parse::<ProductSort>())
            .transpose()?
            .unwrap_or_default();
        let skip = non_empty(self.skip)
            .map(|s| {
                s.trim()
                    .parse::<i64>()
                    .map_err(|_| format!("invalid skip: {s}"))
            })
            .transpose()?
            .unwrap_or(0)
            .max(0);

        Ok(ProductFilter {
            category_id,
            collection,
            search: non_empty(self.search),
            sort,
            skip,
        })
    }
}

/// Product page payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<CategoryRef>,
    pub reviews: Vec<Review>,
    pub related_products: Vec<ProductSummary>,
}

/// Query for the home categories strip.
#[derive(Debug, Deserialize)]
pub struct TakeQuery {
    pub take: Option<i64>,
}

/// List active products.
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductPage>> {
    let filter = query.into_filter().map_err(AppError::BadRequest)?;
    let page = CatalogRepository::new(state.pool())
        .list_products(&filter)
        .await?;
    Ok(Json(page))
}

/// Product detail with category, approved reviews and related products.
#[instrument(skip(state))]
pub async fn show_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductDetail>> {
    let id = ProductId::new(id);
    let catalog = CatalogRepository::new(state.pool());

    let product = catalog
        .get_active_product(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let (category, related_products) = match product.category_id {
        Some(category_id) => {
            let category = catalog.get_category(category_id).await?.map(category_ref);
            let related = catalog
                .related_products(category_id, id, RELATED_PRODUCTS)
                .await?;
            (category, related)
        }
        None => (None, Vec::new()),
    };

    let reviews = ContentRepository::new(state.pool())
        .approved_reviews(id, PRODUCT_REVIEWS)
        .await?;

    Ok(Json(ProductDetail {
        product,
        category,
        reviews,
        related_products,
    }))
}

/// Active categories with product counts.
#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<CategoryWithCount>>> {
    let categories = CatalogRepository::new(state.pool())
        .active_categories()
        .await?;
    Ok(Json(categories))
}

/// First active categories for the home page.
#[instrument(skip(state))]
pub async fn home_categories(
    State(state): State<AppState>,
    Query(query): Query<TakeQuery>,
) -> Result<Json<Vec<Category>>> {
    let take = query.take.unwrap_or(DEFAULT_HOME_CATEGORIES).clamp(1, 50);
    let categories = CatalogRepository::new(state.pool())
        .home_categories(take)
        .await?;
    Ok(Json(categories))
}

fn category_ref(category: Category) -> CategoryRef {
    CategoryRef {
        id: category.id,
        name: category.name,
        slug: category.slug,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn query(qs: &str) -> ProductListQuery {
        let uri: axum::http::Uri = format!("/api/products?{qs}").parse().unwrap();
        Query::<ProductListQuery>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn test_empty_query_defaults() {
        let filter = query("").into_filter().unwrap();
        assert_eq!(filter.sort, ProductSort::Newest);
        assert_eq!(filter.skip, 0);
        assert!(filter.category_id.is_none());
        assert!(filter.collection.is_none());
        assert!(filter.search.is_none());
    }

    #[test]
    fn test_full_query() {
        let filter = query("category=3&collection=BEST_SELL&search=kurti&sort=price-asc&skip=40")
            .into_filter()
            .unwrap();

        assert_eq!(filter.category_id, Some(CategoryId::new(3)));
        assert_eq!(filter.collection, Some(ProductCollection::BestSell));
        assert_eq!(filter.search.as_deref(), Some("kurti"));
        assert_eq!(filter.sort, ProductSort::PriceAsc);
        assert_eq!(filter.skip, 40);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(query("sort=cheapest").into_filter().is_err());
        assert!(query("collection=SALE").into_filter().is_err());
        assert!(query("category=abc").into_filter().is_err());
        assert!(query("skip=ten").into_filter().is_err());
    }

    #[test]
    fn test_negative_skip_clamped() {
        let filter = query("skip=-20").into_filter().unwrap();
        assert_eq!(filter.skip, 0);
    }
}
