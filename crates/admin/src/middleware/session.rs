//! Session middleware configuration for admin.
//!
//! Sessions live in the shared `tower_sessions.session` table under their
//! own cookie name, so a storefront cart cookie never authenticates here.

use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::config::AdminConfig;

/// Session cookie name for admin.
pub const SESSION_COOKIE_NAME: &str = "shilpini_admin_session";

/// Session expiry time in seconds (one year).
const SESSION_EXPIRY_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Create the session layer over `store`.
#[must_use]
pub fn create_session_layer<S: SessionStore + Clone>(
    store: S,
    config: &AdminConfig,
) -> SessionManagerLayer<S> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
