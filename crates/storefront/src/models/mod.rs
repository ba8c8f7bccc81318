//! Domain models for storefront.
//!
//! Catalog, order and cart models live in `shilpini-core`; this module only
//! holds what is specific to the storefront's HTTP surface.

pub mod session;

pub use session::keys as session_keys;
