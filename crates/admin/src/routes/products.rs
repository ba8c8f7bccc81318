//! Product management.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use tracing::instrument;

use shilpini_core::{Product, ProductId};

use super::{SearchQuery, Success};
use crate::db::ProductRepository;
use crate::db::products::{CategoryChoice, ProductListItem};
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::models::form::ProductForm;
use crate::state::AppState;

/// Response to a product create.
#[derive(Debug, Serialize)]
pub struct Created<T> {
    pub success: bool,
    pub id: T,
}

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(index).post(create))
        .route("/api/products/categories", get(categories))
        .route("/api/products/{id}", get(show).put(update).delete(destroy))
}

/// GET /api/products
#[instrument(skip(state, _admin))]
async fn index(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ProductListItem>>> {
    let products = ProductRepository::new(state.pool())
        .list(query.search.as_deref())
        .await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
#[instrument(skip(state, _admin))]
async fn show(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    Ok(Json(ProductRepository::new(state.pool()).get(id).await?))
}

/// POST /api/products
#[instrument(skip(state, admin, form), fields(admin_id = %admin.0.id))]
async fn create(
    admin: RequireAdminAuth,
    State(state): State<AppState>,
    Json(form): Json<ProductForm>,
) -> Result<(StatusCode, Json<Created<ProductId>>)> {
    let input = form.validate()?;
    let id = ProductRepository::new(state.pool()).create(&input).await?;
    tracing::info!(product_id = %id, name = %input.name, "Product created");
    Ok((StatusCode::CREATED, Json(Created { success: true, id })))
}

/// PUT /api/products/{id}
#[instrument(skip(state, admin, form), fields(admin_id = %admin.0.id))]
async fn update(
    admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(form): Json<ProductForm>,
) -> Result<Json<Success>> {
    let input = form.validate()?;
    ProductRepository::new(state.pool()).update(id, &input).await?;
    tracing::info!(product_id = %id, "Product updated");
    Ok(Json(Success::OK))
}

/// DELETE /api/products/{id}
#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
async fn destroy(
    admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Success>> {
    ProductRepository::new(state.pool()).delete(id).await?;
    tracing::info!(product_id = %id, "Product deleted");
    Ok(Json(Success::OK))
}

/// GET /api/products/categories
async fn categories(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryChoice>>> {
    Ok(Json(ProductRepository::new(state.pool()).category_choices().await?))
}
