//! Shilpini Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::trace::TraceLayer;
use tower_sessions::SessionStore;

use state::AppState;

/// Build the storefront router with sessions, tracing and request ids.
///
/// Sentry layers are added by the binary, outermost.
pub fn app<S: SessionStore + Clone>(state: AppState, session_store: S) -> Router {
    let session_layer = middleware::create_session_layer(session_store, state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(session_layer)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use axum::{
        body::Body,
        http::{Request, header},
    };
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::middleware::request_id::REQUEST_ID_HEADER;

    fn test_app() -> Router {
        let config = StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/shilpini_test"),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            email: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/shilpini_test")
            .unwrap();
        app(AppState::new(config, pool), MemoryStore::default())
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_new_visitor_has_empty_cart() {
        let response = test_app()
            .oneshot(Request::get("/cart").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["totalItems"], 0);
        assert_eq!(json["totalPrice"], "0.00");
    }

    #[tokio::test]
    async fn test_checkout_with_empty_cart_is_rejected() {
        let form = serde_json::json!({
            "name": "Nusrat Jahan",
            "phone": "01712345678",
            "address": "Zindabazar",
            "district": "Sylhet",
        });
        let response = test_app()
            .oneshot(
                Request::post("/checkout")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(form.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Your cart is empty");
    }

    #[tokio::test]
    async fn test_invalid_sort_is_bad_request() {
        let response = test_app()
            .oneshot(
                Request::get("/api/products?sort=cheapest")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_success_page_without_order_redirects_home() {
        let response = test_app()
            .oneshot(
                Request::get("/checkout/success")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn test_updating_unknown_line_leaves_cart_empty() {
        let response = test_app()
            .oneshot(
                Request::post("/cart/update")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"lineId": "missing", "quantity": 3}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["totalItems"], 0);
    }
}
