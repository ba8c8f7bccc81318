//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! # Cart (session-backed, JSON)
//! GET  /cart                   - Cart contents and totals
//! POST /cart/add               - Add a product with selected options
//! POST /cart/update            - Set a line's quantity
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Item count badge
//!
//! # Checkout
//! POST /checkout               - Place a cash-on-delivery order
//! GET  /checkout/success       - Order confirmation page
//!
//! # Catalog API
//! GET  /api/products           - Product listing (filters, search, sort, paging)
//! GET  /api/products/{id}      - Product detail
//! GET  /api/categories         - Active categories with product counts
//! GET  /api/categories/home    - Home page categories
//! GET  /api/sliders            - Active hero slides
//! GET  /api/reviews/showcase   - Showcase reviews
//! GET  /api/settings/shipping  - Shipping charges
//! ```

pub mod api;
pub mod cart;
pub mod checkout;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::submit))
        .route("/success", get(checkout::success))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .nest("/api", api::routes())
}
