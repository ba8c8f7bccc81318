//! Domain models for admin.

pub mod admin;
pub mod form;
pub mod session;

pub use admin::{Admin, AdminProfile, AdminRole};
pub use form::FormError;
pub use session::keys as session_keys;
