//! Orders and order items.
//!
//! Order items are snapshots: they copy the product's name, image, price and
//! selected options at checkout so historical orders stay stable when the
//! product is later edited or deleted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{OrderId, OrderItemId, ProductId};
use super::options::SelectedOptions;
use super::status::{OrderStatus, PaymentMethod, PaymentStatus};
use crate::cart::CartLine;

/// Prefix of every human-readable order number.
pub const ORDER_NUMBER_PREFIX: &str = "SHILP";

/// Counter value assigned to the first order.
pub const ORDER_NUMBER_BASE: i64 = 1001;

/// Build the human-readable order number for a counter value.
///
/// ```
/// use shilpini_core::types::order::order_number;
///
/// assert_eq!(order_number(1001), "SHILP1001");
/// ```
#[must_use]
pub fn order_number(count: i64) -> String {
    format!("{ORDER_NUMBER_PREFIX}{count}")
}

/// A persisted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub address: String,
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Line items, loaded separately from the order row.
    #[cfg_attr(feature = "postgres", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// A persisted order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    /// Cleared when the product is deleted; the snapshot fields remain.
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub product_image: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    #[cfg_attr(feature = "postgres", sqlx(json))]
    pub selected_options: SelectedOptions,
}

impl OrderItem {
    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// An order ready to be persisted.
///
/// Status, payment status and payment method are not carried here: a new
/// order is always pending, unpaid and cash on delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_phone: String,
    pub address: String,
    pub notes: Option<String>,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub items: Vec<NewOrderItem>,
}

impl NewOrder {
    /// Whether `total = subtotal + shipping_cost - discount` holds.
    #[must_use]
    pub fn totals_consistent(&self) -> bool {
        self.total == self.subtotal + self.shipping_cost - self.discount
    }
}

/// Snapshot of one cart line for a new order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_image: Option<String>,
    pub price: Decimal,
    pub quantity: u32,
    pub selected_options: SelectedOptions,
}

impl NewOrderItem {
    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

impl From<&CartLine> for NewOrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            product_name: line.name.clone(),
            product_image: line.featured_image.clone(),
            price: line.price,
            quantity: line.quantity,
            selected_options: line.selected_options.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_number_format() {
        assert_eq!(order_number(ORDER_NUMBER_BASE), "SHILP1001");
        assert_eq!(order_number(1002), "SHILP1002");
    }

    #[test]
    fn test_line_total() {
        let item = NewOrderItem {
            product_id: ProductId::new(1),
            product_name: "Kurti".to_owned(),
            product_image: None,
            price: Decimal::new(49_950, 2),
            quantity: 3,
            selected_options: SelectedOptions::new(),
        };
        assert_eq!(item.line_total(), Decimal::new(149_850, 2));
    }
}
