//! Order persistence.

use std::collections::HashMap;

use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;

use shilpini_core::{
    NewOrder, ORDER_NUMBER_BASE, OrderId, OrderStatus, PaymentMethod, PaymentStatus, ProductId,
    order_number,
};

use super::RepositoryError;

/// Name of the counter row that numbers orders.
const ORDER_COUNTER: &str = "order_number";

/// A committed order.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub id: OrderId,
    pub order_number: String,
    /// Products ordered beyond their live stock at commit time.
    pub oversold: Vec<OversoldProduct>,
}

/// A product whose ordered quantity exceeded its stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OversoldProduct {
    pub product_id: ProductId,
    pub ordered: i64,
    pub in_stock: i32,
}

/// Repository for order writes.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist an order and its items in one transaction.
    ///
    /// The order number comes from an atomic counter upsert in the same
    /// transaction, so two concurrent checkouts never share a number and a
    /// failed checkout never consumes one. Stock is read but not decremented
    /// or enforced; overselling is reported in [`PlacedOrder::oversold`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing is
    /// written in that case.
    #[instrument(skip(self, order), fields(items = order.items.len()))]
    pub async fn create(&self, order: &NewOrder) -> Result<PlacedOrder, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let count: i64 = sqlx::query_scalar(
            r"
            INSERT INTO counter (name, count)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET count = counter.count + 1
            RETURNING count
            ",
        )
        .bind(ORDER_COUNTER)
        .bind(ORDER_NUMBER_BASE)
        .fetch_one(&mut *tx)
        .await?;
        let number = order_number(count);

        let id: OrderId = sqlx::query_scalar(
            r"
            INSERT INTO orders (
                order_number, customer_name, customer_phone, address, notes,
                status, payment_status, payment_method,
                subtotal, shipping_cost, discount, total
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            ",
        )
        .bind(&number)
        .bind(&order.customer_name)
        .bind(&order.customer_phone)
        .bind(&order.address)
        .bind(order.notes.as_deref())
        .bind(OrderStatus::Pending)
        .bind(PaymentStatus::Unpaid)
        .bind(PaymentMethod::Cod)
        .bind(order.subtotal)
        .bind(order.shipping_cost)
        .bind(order.discount)
        .bind(order.total)
        .fetch_one(&mut *tx)
        .await?;

        let mut ordered: HashMap<ProductId, i64> = HashMap::new();
        for item in &order.items {
            let quantity = i32::try_from(item.quantity).map_err(|_| {
                RepositoryError::DataCorruption(format!("quantity out of range: {}", item.quantity))
            })?;

            // A product deleted since it was added to the cart leaves the
            // reference empty; the snapshot fields still describe it.
            sqlx::query(
                r"
                INSERT INTO order_item (
                    order_id, product_id, product_name, product_image,
                    price, quantity, selected_options
                )
                VALUES ($1, (SELECT id FROM product WHERE id = $2), $3, $4, $5, $6, $7)
                ",
            )
            .bind(id)
            .bind(item.product_id)
            .bind(&item.product_name)
            .bind(item.product_image.as_deref())
            .bind(item.price)
            .bind(quantity)
            .bind(Json(&item.selected_options))
            .execute(&mut *tx)
            .await?;

            *ordered.entry(item.product_id).or_default() += i64::from(item.quantity);
        }

        let product_ids: Vec<ProductId> = ordered.keys().copied().collect();
        let stock: Vec<(ProductId, i32)> =
            sqlx::query_as("SELECT id, stock FROM product WHERE id = ANY($1)")
                .bind(&product_ids)
                .fetch_all(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(PlacedOrder {
            id,
            order_number: number,
            oversold: find_oversold(&ordered, &stock),
        })
    }
}

fn find_oversold(ordered: &HashMap<ProductId, i64>, stock: &[(ProductId, i32)]) -> Vec<OversoldProduct> {
    let mut oversold: Vec<OversoldProduct> = stock
        .iter()
        .filter_map(|&(product_id, in_stock)| {
            let ordered = *ordered.get(&product_id)?;
            (ordered > i64::from(in_stock)).then_some(OversoldProduct {
                product_id,
                ordered,
                in_stock,
            })
        })
        .collect();
    oversold.sort_by_key(|o| o.product_id);
    oversold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_oversold() {
        let ordered = HashMap::from([
            (ProductId::new(1), 3),
            (ProductId::new(2), 1),
            (ProductId::new(3), 5),
        ]);
        let stock = vec![
            (ProductId::new(1), 2),
            (ProductId::new(2), 1),
            (ProductId::new(3), 0),
        ];

        assert_eq!(
            find_oversold(&ordered, &stock),
            vec![
                OversoldProduct {
                    product_id: ProductId::new(1),
                    ordered: 3,
                    in_stock: 2
                },
                OversoldProduct {
                    product_id: ProductId::new(3),
                    ordered: 5,
                    in_stock: 0
                },
            ]
        );
    }
}
