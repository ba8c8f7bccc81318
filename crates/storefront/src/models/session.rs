//! Session-related types.

/// Session keys.
pub mod keys {
    /// Key for the visitor's cart (JSON array of cart lines).
    pub const CART: &str = "shilpini-cart";
}
