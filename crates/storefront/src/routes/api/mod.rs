//! JSON API consumed by the storefront pages.

pub mod catalog;
pub mod content;
pub mod settings;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the `/api` router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::list_products))
        .route("/products/{id}", get(catalog::show_product))
        .route("/categories", get(catalog::list_categories))
        .route("/categories/home", get(catalog::home_categories))
        .route("/sliders", get(content::sliders))
        .route("/reviews/showcase", get(content::showcase_reviews))
        .route("/settings/shipping", get(settings::shipping))
}
