//! Checkout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use shilpini_core::OrderId;

use crate::error::Result;
use crate::services::{CheckoutForm, SessionCartStore, place_order};
use crate::state::AppState;

/// Successful checkout response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub success: bool,
    pub order_number: String,
    pub order_id: OrderId,
}

/// Query for the confirmation page.
#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    pub order_number: Option<String>,
}

/// Order confirmation page.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct CheckoutSuccessTemplate {
    pub order_number: String,
}

/// Place a cash-on-delivery order from the session cart.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CheckoutForm>,
) -> Result<Json<CheckoutResponse>> {
    let store = SessionCartStore::new(session);
    let placed = place_order(&state, &store, &form).await?;

    Ok(Json(CheckoutResponse {
        success: true,
        order_number: placed.order_number,
        order_id: placed.id,
    }))
}

/// Confirmation page shown after a successful checkout.
pub async fn success(Query(query): Query<SuccessQuery>) -> Response {
    match query.order_number.filter(|n| !n.trim().is_empty()) {
        Some(order_number) => CheckoutSuccessTemplate { order_number }.into_response(),
        None => Redirect::to("/").into_response(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_success_page_shows_order_number() {
        let html = CheckoutSuccessTemplate {
            order_number: "SHILP1001".to_string(),
        }
        .render()
        .unwrap();
        assert!(html.contains("SHILP1001"));
    }

    #[test]
    fn test_checkout_response_shape() {
        let json = serde_json::to_value(CheckoutResponse {
            success: true,
            order_number: "SHILP1002".to_string(),
            order_id: OrderId::new(9),
        })
        .unwrap();
        assert_eq!(json["orderNumber"], "SHILP1002");
        assert_eq!(json["orderId"], 9);
        assert_eq!(json["success"], true);
    }
}
