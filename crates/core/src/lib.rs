//! Shilpini Core - Shared domain types and the cart engine.
//!
//! This crate provides the types used across all Shilpini components:
//! - `storefront` - Public-facing shop (catalog, cart, checkout)
//! - `admin` - Back office for catalog, orders and settings
//! - `cli` - Command-line tools for migrations, admin users and seeding
//!
//! # Architecture
//!
//! The core crate contains only types, validation and pure logic - no I/O,
//! no database access, no HTTP clients. Persistence of the cart is expressed
//! through the [`cart::CartStore`] trait so each binary decides where carts live.
//!
//! # Modules
//!
//! - [`types`] - IDs, prices, statuses, phone numbers, shipping rates and catalog models
//! - [`cart`] - Cart lines, variant matching and totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{AddOutcome, Cart, CartLine, CartLineId, CartProduct, CartStore, MemoryCartStore};
pub use types::*;
