//! Category management.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use tracing::instrument;

use shilpini_core::{Category, CategoryId};

use super::Success;
use crate::db::CategoryRepository;
use crate::db::categories::CategoryListItem;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::models::form::CategoryForm;
use crate::state::AppState;

/// New value of a toggled flag.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveToggled {
    pub success: bool,
    pub is_active: bool,
}

/// Build the categories router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(index).post(create))
        .route("/api/categories/{id}", get(show).put(update).delete(destroy))
        .route("/api/categories/{id}/toggle", post(toggle))
}

/// GET /api/categories
#[instrument(skip(state, _admin))]
async fn index(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryListItem>>> {
    Ok(Json(CategoryRepository::new(state.pool()).list().await?))
}

/// GET /api/categories/{id}
#[instrument(skip(state, _admin))]
async fn show(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<Category>> {
    Ok(Json(CategoryRepository::new(state.pool()).get(id).await?))
}

/// POST /api/categories
#[instrument(skip(state, _admin, form))]
async fn create(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Json(form): Json<CategoryForm>,
) -> Result<(StatusCode, Json<Category>)> {
    let input = form.validate()?;
    let category = CategoryRepository::new(state.pool()).create(&input).await?;
    tracing::info!(category_id = %category.id, slug = %category.slug, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/{id}
#[instrument(skip(state, _admin, form))]
async fn update(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(form): Json<CategoryForm>,
) -> Result<Json<Category>> {
    let input = form.validate()?;
    Ok(Json(CategoryRepository::new(state.pool()).update(id, &input).await?))
}

/// POST /api/categories/{id}/toggle
#[instrument(skip(state, _admin))]
async fn toggle(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<ActiveToggled>> {
    let is_active = CategoryRepository::new(state.pool()).toggle_active(id).await?;
    Ok(Json(ActiveToggled {
        success: true,
        is_active,
    }))
}

/// DELETE /api/categories/{id}
#[instrument(skip(state, _admin))]
async fn destroy(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<Success>> {
    CategoryRepository::new(state.pool()).delete(id).await?;
    tracing::info!(category_id = %id, "Category deleted");
    Ok(Json(Success::OK))
}
