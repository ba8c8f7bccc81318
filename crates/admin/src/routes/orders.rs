//! Order management.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use serde::Deserialize;
use tracing::instrument;

use shilpini_core::{Order, OrderId, OrderStatus, PaymentStatus};

use super::Success;
use crate::db::OrderRepository;
use crate::db::orders::{OrderFilter, OrderListItem};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// `?search=&status=` for the order table.
#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl OrderListQuery {
    fn into_filter(self) -> Result<OrderFilter> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(
                serde_json::from_value::<OrderStatus>(serde_json::Value::String(s.to_owned()))
                    .map_err(|_| AppError::BadRequest(format!("Invalid order status: {s}")))?,
            ),
        };
        Ok(OrderFilter {
            search: self.search,
            status,
        })
    }
}

/// Body of `PUT /api/orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// Body of `PUT /api/orders/{id}/payment-status`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusUpdate {
    #[serde(alias = "payment_status")]
    pub payment_status: PaymentStatus,
}

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(index))
        .route("/api/orders/{id}", get(show).delete(destroy))
        .route("/api/orders/{id}/status", put(update_status))
        .route("/api/orders/{id}/payment-status", put(update_payment_status))
}

/// GET /api/orders
#[instrument(skip(state, _admin))]
async fn index(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<OrderListItem>>> {
    let filter = query.into_filter()?;
    Ok(Json(OrderRepository::new(state.pool()).list(&filter).await?))
}

/// GET /api/orders/{id}
#[instrument(skip(state, _admin))]
async fn show(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    Ok(Json(OrderRepository::new(state.pool()).get(id).await?))
}

/// PUT /api/orders/{id}/status
#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
async fn update_status(
    admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Success>> {
    OrderRepository::new(state.pool())
        .update_status(id, update.status)
        .await?;
    tracing::info!(order_id = %id, status = ?update.status, "Order status changed");
    Ok(Json(Success::OK))
}

/// PUT /api/orders/{id}/payment-status
#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
async fn update_payment_status(
    admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(update): Json<PaymentStatusUpdate>,
) -> Result<Json<Success>> {
    OrderRepository::new(state.pool())
        .update_payment_status(id, update.payment_status)
        .await?;
    tracing::info!(order_id = %id, payment_status = ?update.payment_status, "Payment status changed");
    Ok(Json(Success::OK))
}

/// DELETE /api/orders/{id}
#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
async fn destroy(
    admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Success>> {
    OrderRepository::new(state.pool()).delete(id).await?;
    tracing::warn!(order_id = %id, "Order deleted");
    Ok(Json(Success::OK))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Uri;

    use super::*;

    fn query(uri: &'static str) -> OrderListQuery {
        Query::<OrderListQuery>::try_from_uri(&Uri::from_static(uri))
            .unwrap()
            .0
    }

    #[test]
    fn test_status_filter_parsed() {
        let filter = query("/api/orders?status=SHIPPED&search=SHILP").into_filter().unwrap();
        assert_eq!(filter.status, Some(OrderStatus::Shipped));
        assert_eq!(filter.search.as_deref(), Some("SHILP"));

        let filter = query("/api/orders?status=").into_filter().unwrap();
        assert_eq!(filter.status, None);
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(matches!(
            query("/api/orders?status=LOST").into_filter(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_payment_status_body_spellings() {
        let camel: PaymentStatusUpdate =
            serde_json::from_str(r#"{"paymentStatus": "PAID"}"#).unwrap();
        let snake: PaymentStatusUpdate =
            serde_json::from_str(r#"{"payment_status": "REFUNDED"}"#).unwrap();
        assert_eq!(camel.payment_status, PaymentStatus::Paid);
        assert_eq!(snake.payment_status, PaymentStatus::Refunded);
    }
}
