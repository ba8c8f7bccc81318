//! Session keys for admin authentication.

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for the logged-in admin's id.
    pub const ADMIN_ID: &str = "shilpini-admin-id";
}
