//! Login, logout and session check.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use shilpini_core::AdminId;

use crate::db::AdminRepository;
use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::OptionalAdminAuth;
use crate::models::{AdminProfile, session_keys};
use crate::services::verify_password;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response after logging in.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub admin: AdminProfile,
}

/// Session state for the admin UI.
#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<AdminProfile>,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/api/check-auth", get(check_auth))
}

/// Verify credentials and start an admin session.
///
/// POST /login
#[instrument(skip(state, session, request), fields(email = %request.email))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let admin = AdminRepository::new(state.pool())
        .get_by_email(&request.email)
        .await?
        .filter(|admin| verify_password(&request.password, &admin.password_hash))
        .ok_or_else(|| {
            tracing::info!("Failed admin login");
            AppError::Unauthorized(INVALID_CREDENTIALS.to_string())
        })?;

    session.cycle_id().await?;
    session.insert(session_keys::ADMIN_ID, admin.id).await?;
    set_sentry_user(admin.id.as_i32(), &admin.email);
    tracing::info!(admin_id = %admin.id, "Admin logged in");

    Ok(Json(LoginResponse {
        success: true,
        admin: AdminProfile::from(&admin),
    }))
}

/// End the admin session.
///
/// POST /logout
#[instrument(skip(session))]
async fn logout(session: Session) -> Result<Json<super::Success>> {
    if let Some(admin_id) = session.get::<AdminId>(session_keys::ADMIN_ID).await? {
        tracing::info!(admin_id = %admin_id, "Admin logged out");
    }
    session.flush().await?;
    clear_sentry_user();
    Ok(Json(super::Success::OK))
}

/// Report whether the caller has an admin session.
///
/// GET /api/check-auth
async fn check_auth(OptionalAdminAuth(admin): OptionalAdminAuth) -> Json<AuthStatus> {
    Json(AuthStatus {
        authenticated: admin.is_some(),
        admin: admin.as_ref().map(AdminProfile::from),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_status_omits_admin() {
        let json = serde_json::to_value(AuthStatus {
            authenticated: false,
            admin: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "authenticated": false }));
    }
}
