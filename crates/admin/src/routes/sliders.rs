//! Hero slider management.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use tracing::instrument;

use shilpini_core::{SliderContent, SliderId};

use super::Success;
use crate::db::SliderRepository;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::models::form::SliderForm;
use crate::state::AppState;

/// Build the sliders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/sliders", get(index).post(create))
        .route("/api/sliders/{id}", get(show).put(update).delete(destroy))
}

/// GET /api/sliders
async fn index(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<SliderContent>>> {
    Ok(Json(SliderRepository::new(state.pool()).list().await?))
}

/// GET /api/sliders/{id}
async fn show(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<SliderId>,
) -> Result<Json<SliderContent>> {
    Ok(Json(SliderRepository::new(state.pool()).get(id).await?))
}

/// POST /api/sliders
#[instrument(skip(state, _admin, form))]
async fn create(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Json(form): Json<SliderForm>,
) -> Result<(StatusCode, Json<SliderContent>)> {
    let input = form.validate()?;
    let slide = SliderRepository::new(state.pool()).create(&input).await?;
    tracing::info!(slider_id = %slide.id, "Slide created");
    Ok((StatusCode::CREATED, Json(slide)))
}

/// PUT /api/sliders/{id}
#[instrument(skip(state, _admin, form))]
async fn update(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<SliderId>,
    Json(form): Json<SliderForm>,
) -> Result<Json<SliderContent>> {
    let input = form.validate()?;
    Ok(Json(SliderRepository::new(state.pool()).update(id, &input).await?))
}

/// DELETE /api/sliders/{id}
#[instrument(skip(state, _admin))]
async fn destroy(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<SliderId>,
) -> Result<Json<Success>> {
    SliderRepository::new(state.pool()).delete(id).await?;
    Ok(Json(Success::OK))
}
