//! Integration tests for the storefront and admin routers side by side.
//!
//! Both apps are mounted over a lazily connected pool and in-memory session
//! stores. Only requests that are answered before any query runs are sent.

#![allow(clippy::unwrap_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use shilpini_integration_tests::{admin_config, lazy_pool, storefront_config};

fn storefront() -> Router {
    let state = shilpini_storefront::state::AppState::new(storefront_config(), lazy_pool());
    shilpini_storefront::app(state, MemoryStore::default())
}

fn admin() -> Router {
    let state = shilpini_admin::state::AppState::new(admin_config(), lazy_pool());
    shilpini_admin::app(state, MemoryStore::default())
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_post(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =============================================================================
// Sessions
// =============================================================================

#[test]
fn test_apps_use_distinct_session_cookies() {
    assert_ne!(
        shilpini_storefront::middleware::session::SESSION_COOKIE_NAME,
        shilpini_admin::middleware::session::SESSION_COOKIE_NAME
    );
}

#[tokio::test]
async fn test_cart_write_sets_storefront_cookie_only() {
    let response = storefront()
        .oneshot(json_post("/cart/clear", &serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(cookie.starts_with(shilpini_storefront::middleware::session::SESSION_COOKIE_NAME));

    let json = body_json(response).await;
    assert_eq!(json["totalItems"], 0);
    assert_eq!(json["totalPrice"], "0.00");
}

#[tokio::test]
async fn test_storefront_session_does_not_authenticate_admin() {
    let response = storefront()
        .oneshot(json_post("/cart/clear", &serde_json::json!({})))
        .await
        .unwrap();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .unwrap_or_default()
        .to_owned();

    let response = admin()
        .oneshot(
            Request::get("/api/check-auth")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["authenticated"], false);
}

// =============================================================================
// Admin guard
// =============================================================================

#[tokio::test]
async fn test_admin_api_requires_login() {
    for uri in [
        "/api/dashboard",
        "/api/products",
        "/api/categories",
        "/api/orders",
        "/api/sliders",
        "/api/reviews",
        "/api/settings/shipping",
    ] {
        let response = admin()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body_json(response).await["error"], "Not authenticated");
    }
}

#[tokio::test]
async fn test_admin_writes_require_login() {
    let response = admin()
        .oneshot(json_post(
            "/api/settings/shipping",
            &serde_json::json!({ "insideDhakaShipping": 60, "outsideDhakaShipping": 150 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Storefront errors
// =============================================================================

#[tokio::test]
async fn test_checkout_with_empty_cart_is_rejected() {
    let form = serde_json::json!({
        "name": "Nusrat Jahan",
        "phone": "01712345678",
        "address": "House 4, Road 2",
        "district": "Dhaka"
    });
    let response = storefront()
        .oneshot(json_post("/checkout", &form))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Your cart is empty");
}

#[tokio::test]
async fn test_success_page_without_order_number_redirects_home() {
    let response = storefront()
        .oneshot(Request::get("/checkout/success").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/"
    );
}
