//! HTTP middleware stack for admin.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing with an `admin_id` span field)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//!
//! Authentication is an extractor rather than a layer, so each handler
//! states whether it needs a logged-in admin.

pub mod auth;
pub mod session;

pub use auth::{OptionalAdminAuth, RequireAdminAuth};
pub use session::create_session_layer;
