//! Dashboard counters.

use axum::{Json, Router, extract::State, routing::get};

use crate::db::{DashboardRepository, DashboardStats};
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard", get(stats))
}

/// GET /api/dashboard
async fn stats(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>> {
    Ok(Json(DashboardRepository::new(state.pool()).stats().await?))
}
