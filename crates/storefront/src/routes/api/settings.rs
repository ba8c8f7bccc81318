//! Public shop settings.

use axum::{Json, extract::State};
use tracing::instrument;

use shilpini_core::ShippingRates;

use crate::db::SettingsRepository;
use crate::error::Result;
use crate::state::AppState;

/// Current shipping charges, created with defaults on first access.
#[instrument(skip(state))]
pub async fn shipping(State(state): State<AppState>) -> Result<Json<ShippingRates>> {
    let rates = SettingsRepository::new(state.pool()).shipping_rates().await?;
    Ok(Json(rates))
}
