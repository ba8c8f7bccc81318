//! Shipping-rate settings.

use axum::{Json, Router, extract::State, routing::get};
use tracing::instrument;

use shilpini_core::ShippingRates;

use crate::db::SettingsRepository;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::models::form::ShippingForm;
use crate::state::AppState;

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/settings/shipping", get(shipping).post(update_shipping))
}

/// GET /api/settings/shipping
async fn shipping(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<ShippingRates>> {
    Ok(Json(SettingsRepository::new(state.pool()).shipping_rates().await?))
}

/// POST /api/settings/shipping
///
/// Both rates must parse as positive numbers; the first offending field is
/// named in the 400 message.
#[instrument(skip(state, admin, form), fields(admin_id = %admin.0.id))]
async fn update_shipping(
    admin: RequireAdminAuth,
    State(state): State<AppState>,
    Json(form): Json<ShippingForm>,
) -> Result<Json<ShippingRates>> {
    let rates = form.validate()?;
    let rates = SettingsRepository::new(state.pool())
        .update_shipping_rates(&rates)
        .await?;
    tracing::info!(inside = %rates.inside, outside = %rates.outside, "Shipping rates updated");
    Ok(Json(rates))
}
