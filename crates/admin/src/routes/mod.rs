//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Health check
//!
//! # Auth (email + password, session cookie)
//! POST /login                         - Log in
//! POST /logout                        - Log out
//! GET  /api/check-auth                - Current session state
//!
//! # Catalog
//! GET  /api/products                  - Product table (?search=)
//! POST /api/products                  - Create product
//! GET  /api/products/categories       - Category choices for the product form
//! GET  /api/products/{id}             - Product with option groups
//! PUT  /api/products/{id}             - Update product
//! DELETE /api/products/{id}           - Delete product
//! GET  /api/categories                - Category table
//! POST /api/categories                - Create category
//! GET  /api/categories/{id}           - Category
//! PUT  /api/categories/{id}           - Update category
//! POST /api/categories/{id}/toggle    - Flip active flag
//! DELETE /api/categories/{id}         - Delete category
//!
//! # Orders
//! GET  /api/orders                    - Order table (?search=&status=)
//! GET  /api/orders/{id}               - Order with items
//! PUT  /api/orders/{id}/status        - Set fulfilment status
//! PUT  /api/orders/{id}/payment-status - Set payment status
//! DELETE /api/orders/{id}             - Delete order
//!
//! # Content
//! GET|POST /api/sliders, GET|PUT|DELETE /api/sliders/{id}
//! GET|POST /api/reviews, GET|PUT|DELETE /api/reviews/{id}
//! POST /api/reviews/{id}/toggle-approval
//!
//! # Settings, uploads, dashboard
//! GET  /api/settings/shipping         - Shipping rates
//! POST /api/settings/shipping         - Update shipping rates
//! POST /api/upload-image              - Upload to ImgBB (multipart `image`)
//! GET  /api/dashboard                 - Counters
//! ```
//!
//! Everything except `/health`, `/login`, `/logout` and `/api/check-auth`
//! requires [`RequireAdminAuth`](crate::middleware::RequireAdminAuth).

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod settings;
pub mod sliders;
pub mod upload;

use axum::Router;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Body of write endpoints that return nothing else.
#[derive(Debug, Serialize)]
pub struct Success {
    pub success: bool,
}

impl Success {
    pub const OK: Self = Self { success: true };
}

/// `?search=` on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// Build the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(products::router())
        .merge(categories::router())
        .merge(orders::router())
        .merge(sliders::router())
        .merge(reviews::router())
        .merge(settings::router())
        .merge(upload::router())
        .merge(dashboard::router())
}
