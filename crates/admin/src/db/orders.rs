//! Order repository for the back office.
//!
//! Orders are created by the storefront; the admin reads, re-statuses and
//! deletes them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use shilpini_core::{Order, OrderId, OrderStatus, PaymentStatus};

use super::{RepositoryError, affected, like_pattern};

const ORDER_COLUMNS: &str = "id, order_number, customer_name, customer_phone, address, notes, \
     status, payment_status, payment_method, subtotal, shipping_cost, discount, total, \
     created_at, updated_at";

/// Filters for the order table.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Case-insensitive substring of order number, customer name or phone.
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
}

/// Order row for the admin order table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderListItem {
    pub id: OrderId,
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total: Decimal,
    pub item_count: i64,
    pub created_at: DateTime<Utc>,
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &OrderFilter) {
    qb.push(" WHERE TRUE");
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = like_pattern(search);
        qb.push(" AND (o.order_number ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR o.customer_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR o.customer_phone ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(status) = filter.status {
        qb.push(" AND o.status = ").push_bind(status);
    }
}

/// Repository for order administration.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Orders newest first with their item counts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &OrderFilter) -> Result<Vec<OrderListItem>, RepositoryError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT o.id, o.order_number, o.customer_name, o.customer_phone, o.status, \
             o.payment_status, o.total, \
             (SELECT COUNT(*) FROM order_item i WHERE i.order_id = o.id) AS item_count, \
             o.created_at FROM orders o",
        );
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY o.created_at DESC, o.id DESC");

        let orders = qb.build_query_as().fetch_all(self.pool).await?;
        Ok(orders)
    }

    /// An order with its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: OrderId) -> Result<Order, RepositoryError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
        let mut order: Order = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        order.items = sqlx::query_as(
            r"
            SELECT id, order_id, product_id, product_name, product_image,
                   price, quantity, selected_options
            FROM order_item
            WHERE order_id = $1
            ORDER BY id
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;
        Ok(order)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this id.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE orders SET status = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(self.pool)
            .await?;
        affected(result.rows_affected())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this id.
    #[instrument(skip(self))]
    pub async fn update_payment_status(
        &self,
        id: OrderId,
        payment_status: PaymentStatus,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE orders SET payment_status = $2, updated_at = now() WHERE id = $1")
                .bind(id)
                .bind(payment_status)
                .execute(self.pool)
                .await?;
        affected(result.rows_affected())
    }

    /// Delete an order; its items cascade.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        affected(result.rows_affected())
    }
}
