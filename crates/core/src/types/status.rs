//! Status enums for orders, products and admins.

use serde::{Deserialize, Serialize};

/// Order fulfillment status, changed by admins after checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

/// Payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "payment_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
    Refunded,
}

/// Payment method. Checkout only produces cash on delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "payment_method", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cod,
}

/// Marketing collection tag on a product. Used for filtering, not taxonomy.
///
/// The sqlx derive also provides the `_product_collection` array type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "product_collection", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCollection {
    NewArrival,
    BestSell,
    Trending,
}

impl ProductCollection {
    /// All collections, in display order.
    pub const ALL: [Self; 3] = [Self::NewArrival, Self::BestSell, Self::Trending];

    /// Wire name as used in query strings and storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewArrival => "NEW_ARRIVAL",
            Self::BestSell => "BEST_SELL",
            Self::Trending => "TRENDING",
        }
    }
}

impl std::fmt::Display for ProductCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductCollection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("invalid collection: {s}"))
    }
}

/// Admin role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "admin_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access including admin management.
    SuperAdmin,
    /// Full access to store management features.
    #[default]
    Admin,
    /// Read-only access to store data.
    Viewer,
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "super_admin"),
            Self::Admin => write!(f, "admin"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "viewer" => Ok(Self::Viewer),
            _ => Err(format!("invalid admin role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_parse() {
        assert_eq!(
            "BEST_SELL".parse::<ProductCollection>(),
            Ok(ProductCollection::BestSell)
        );
        assert!("best_sell".parse::<ProductCollection>().is_err());
    }

    #[cfg(feature = "postgres")]
    #[test]
    fn test_collection_array_type() {
        use sqlx::TypeInfo;
        use sqlx::postgres::PgHasArrayType;

        let info = <ProductCollection as PgHasArrayType>::array_type_info();
        assert_eq!(info.name(), "_product_collection");
    }

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&OrderStatus::Cancelled).unwrap_or_default();
        assert_eq!(json, "\"CANCELLED\"");
        let json = serde_json::to_string(&PaymentMethod::Cod).unwrap_or_default();
        assert_eq!(json, "\"COD\"");
    }

    #[test]
    fn test_new_orders_default_to_pending_unpaid() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Unpaid);
    }

    #[test]
    fn test_admin_role_roundtrip() {
        for role in [AdminRole::SuperAdmin, AdminRole::Admin, AdminRole::Viewer] {
            assert_eq!(role.to_string().parse::<AdminRole>(), Ok(role));
        }
    }
}
