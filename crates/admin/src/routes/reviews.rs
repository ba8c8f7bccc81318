//! Review moderation.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use tracing::instrument;

use shilpini_core::{Review, ReviewId};

use super::Success;
use crate::db::ReviewRepository;
use crate::db::reviews::ReviewListItem;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::models::form::ReviewForm;
use crate::state::AppState;

/// New approval state after a toggle.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalToggled {
    pub success: bool,
    pub is_approved: bool,
}

/// Build the reviews router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/reviews", get(index).post(create))
        .route("/api/reviews/{id}", get(show).put(update).delete(destroy))
        .route("/api/reviews/{id}/toggle-approval", post(toggle_approval))
}

/// GET /api/reviews
async fn index(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<ReviewListItem>>> {
    Ok(Json(ReviewRepository::new(state.pool()).list().await?))
}

/// GET /api/reviews/{id}
async fn show(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
) -> Result<Json<Review>> {
    Ok(Json(ReviewRepository::new(state.pool()).get(id).await?))
}

/// POST /api/reviews
#[instrument(skip(state, _admin, form))]
async fn create(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Json(form): Json<ReviewForm>,
) -> Result<(StatusCode, Json<Review>)> {
    let input = form.validate()?;
    let review = ReviewRepository::new(state.pool()).create(&input).await?;
    tracing::info!(review_id = %review.id, "Review created");
    Ok((StatusCode::CREATED, Json(review)))
}

/// PUT /api/reviews/{id}
#[instrument(skip(state, _admin, form))]
async fn update(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
    Json(form): Json<ReviewForm>,
) -> Result<Json<Review>> {
    let input = form.validate()?;
    Ok(Json(ReviewRepository::new(state.pool()).update(id, &input).await?))
}

/// POST /api/reviews/{id}/toggle-approval
#[instrument(skip(state, _admin))]
async fn toggle_approval(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
) -> Result<Json<ApprovalToggled>> {
    let is_approved = ReviewRepository::new(state.pool()).toggle_approval(id).await?;
    tracing::info!(review_id = %id, is_approved, "Review approval changed");
    Ok(Json(ApprovalToggled {
        success: true,
        is_approved,
    }))
}

/// DELETE /api/reviews/{id}
#[instrument(skip(state, _admin))]
async fn destroy(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
) -> Result<Json<Success>> {
    ReviewRepository::new(state.pool()).delete(id).await?;
    Ok(Json(Success::OK))
}
