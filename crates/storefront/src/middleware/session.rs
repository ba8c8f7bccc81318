//! Session middleware configuration.
//!
//! Sets up sessions using tower-sessions. Production uses the `PostgreSQL`
//! store; tests pass a `MemoryStore`.

use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "shilpini_session";

/// Session expiry time in seconds (30 days). Carts outlive a browsing session.
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Create the session layer over `store`.
///
/// # Arguments
///
/// * `store` - Session store (`PostgresStore` in production)
/// * `config` - Storefront configuration (for the secure-cookie flag)
#[must_use]
pub fn create_session_layer<S: SessionStore + Clone>(
    store: S,
    config: &StorefrontConfig,
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
