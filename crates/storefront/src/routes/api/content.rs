//! Hero slides and showcase reviews.

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use shilpini_core::{Review, SliderContent};

use super::catalog::TakeQuery;
use crate::db::ContentRepository;
use crate::error::Result;
use crate::state::AppState;

const DEFAULT_SHOWCASE_REVIEWS: i64 = 10;

/// Active hero slides in display order.
#[instrument(skip(state))]
pub async fn sliders(State(state): State<AppState>) -> Result<Json<Vec<SliderContent>>> {
    let sliders = ContentRepository::new(state.pool()).active_sliders().await?;
    Ok(Json(sliders))
}

/// Approved showcase reviews, screenshots first.
#[instrument(skip(state))]
pub async fn showcase_reviews(
    State(state): State<AppState>,
    Query(query): Query<TakeQuery>,
) -> Result<Json<Vec<Review>>> {
    let take = query.take.unwrap_or(DEFAULT_SHOWCASE_REVIEWS).clamp(1, 50);
    let reviews = ContentRepository::new(state.pool())
        .showcase_reviews(take)
        .await?;
    Ok(Json(reviews))
}
