//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Session-backed cart storage
//! - `checkout` - Checkout validation, order composition and placement
//! - `email` - Order notification email

pub mod cart;
pub mod checkout;
pub mod email;

pub use cart::{CartInputError, SessionCartStore};
pub use checkout::{CheckoutError, CheckoutForm, place_order};
pub use email::{EmailError, EmailService, OrderNotification};
