//! Authentication extractors for admin.
//!
//! The session holds only the admin id. Every protected request re-reads the
//! account, so a deleted admin is locked out on their next request.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use shilpini_core::AdminId;

use crate::db::AdminRepository;
use crate::error::{AppError, set_sentry_user};
use crate::models::{Admin, session_keys};
use crate::state::AppState;

const NOT_LOGGED_IN: &str = "Not authenticated";

/// Extractor that requires a logged-in admin.
///
/// Rejects with 401 and a JSON body when the session has no admin id or
/// the id no longer matches an account.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAdminAuth(admin): RequireAdminAuth) -> String {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdminAuth(pub Admin);

impl FromRequestParts<AppState> for RequireAdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let admin = current_admin(parts, state)
            .await?
            .ok_or_else(|| AppError::Unauthorized(NOT_LOGGED_IN.to_string()))?;

        set_sentry_user(admin.id.as_i32(), &admin.email);
        tracing::Span::current().record("admin_id", admin.id.as_i32());
        Ok(Self(admin))
    }
}

/// Extractor that loads the admin if one is logged in.
pub struct OptionalAdminAuth(pub Option<Admin>);

impl FromRequestParts<AppState> for OptionalAdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(current_admin(parts, state).await?))
    }
}

async fn current_admin(parts: &Parts, state: &AppState) -> Result<Option<Admin>, AppError> {
    let Some(session) = parts.extensions.get::<Session>() else {
        return Ok(None);
    };

    let Some(admin_id) = session.get::<AdminId>(session_keys::ADMIN_ID).await? else {
        return Ok(None);
    };

    let admin = AdminRepository::new(state.pool()).get_by_id(admin_id).await?;
    if admin.is_none() {
        tracing::info!(admin_id = %admin_id, "Session refers to a deleted admin");
        session.remove::<AdminId>(session_keys::ADMIN_ID).await?;
    }
    Ok(admin)
}
