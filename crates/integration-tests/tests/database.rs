//! Integration tests against a live `PostgreSQL` database.
//!
//! These tests delete orders, counters and settings, so they only run
//! against the database named by `TEST_DATABASE_URL`:
//!
//! ```bash
//! TEST_DATABASE_URL=postgres://localhost/shilpini_test \
//!     cargo test -p shilpini-integration-tests --test database -- --ignored --test-threads=1
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used)]

use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::task::JoinSet;

use shilpini_core::{
    NewOrder, NewOrderItem, ORDER_NUMBER_BASE, ProductId, SelectedOptions, ShippingRates,
    order_number,
};

const CONCURRENT_CHECKOUTS: i64 = 10;

/// Held by tests that reset the settings singleton.
static SETTINGS_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

async fn test_pool() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(12)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");
    sqlx::migrate!("../storefront/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

async fn settings_rows(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM settings")
        .fetch_one(pool)
        .await
        .unwrap()
}

fn sample_order() -> NewOrder {
    NewOrder {
        customer_name: "Nusrat Jahan".to_string(),
        customer_phone: "01712345678".to_string(),
        address: "House 4, Road 2, Dhaka".to_string(),
        notes: None,
        subtotal: Decimal::from(1450),
        shipping_cost: Decimal::from(70),
        discount: Decimal::ZERO,
        total: Decimal::from(1520),
        items: vec![NewOrderItem {
            // No such product: the item keeps its snapshot with an empty reference.
            product_id: ProductId::new(999_999),
            product_name: "Block Print Kurti".to_string(),
            product_image: None,
            price: Decimal::from(1450),
            quantity: 1,
            selected_options: SelectedOptions::new().with("Size", "M"),
        }],
    }
}

// =============================================================================
// Order numbering
// =============================================================================

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_concurrent_checkouts_get_unique_sequential_numbers() {
    let pool = test_pool().await;
    sqlx::query("DELETE FROM orders").execute(&pool).await.unwrap();
    sqlx::query("DELETE FROM counter WHERE name = 'order_number'")
        .execute(&pool)
        .await
        .unwrap();

    let mut checkouts = JoinSet::new();
    for _ in 0..CONCURRENT_CHECKOUTS {
        let pool = pool.clone();
        checkouts.spawn(async move {
            shilpini_storefront::db::OrderRepository::new(&pool)
                .create(&sample_order())
                .await
        });
    }

    let mut numbers = Vec::new();
    while let Some(result) = checkouts.join_next().await {
        numbers.push(result.unwrap().unwrap().order_number);
    }
    numbers.sort_by_key(|n| n.trim_start_matches("SHILP").parse::<i64>().unwrap());

    let expected: Vec<String> = (ORDER_NUMBER_BASE..ORDER_NUMBER_BASE + CONCURRENT_CHECKOUTS)
        .map(order_number)
        .collect();
    assert_eq!(numbers, expected);
    assert_eq!(numbers.first().map(String::as_str), Some("SHILP1001"));

    let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_item")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(items, CONCURRENT_CHECKOUTS);
}

// =============================================================================
// Settings singleton
// =============================================================================

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_settings_created_once_with_defaults() {
    let _guard = SETTINGS_LOCK.lock().await;
    let pool = test_pool().await;
    sqlx::query("DELETE FROM settings").execute(&pool).await.unwrap();

    let mut readers = JoinSet::new();
    for _ in 0..5 {
        let pool = pool.clone();
        readers.spawn(async move {
            shilpini_storefront::db::SettingsRepository::new(&pool)
                .shipping_rates()
                .await
        });
    }
    while let Some(result) = readers.join_next().await {
        assert_eq!(result.unwrap().unwrap(), ShippingRates::default());
    }
    assert_eq!(settings_rows(&pool).await, 1);

    let again = shilpini_storefront::db::SettingsRepository::new(&pool)
        .shipping_rates()
        .await
        .unwrap();
    assert_eq!(again.inside, Decimal::from(70));
    assert_eq!(again.outside, Decimal::from(180));
    assert_eq!(settings_rows(&pool).await, 1);
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_admin_rate_update_reaches_storefront() {
    let _guard = SETTINGS_LOCK.lock().await;
    let pool = test_pool().await;
    sqlx::query("DELETE FROM settings").execute(&pool).await.unwrap();

    let admin = shilpini_admin::db::SettingsRepository::new(&pool);
    assert_eq!(admin.shipping_rates().await.unwrap(), ShippingRates::default());
    assert_eq!(admin.shipping_rates().await.unwrap(), ShippingRates::default());
    assert_eq!(settings_rows(&pool).await, 1);

    let rates = ShippingRates::new(Decimal::from(60), Decimal::new(15_050, 2)).unwrap();
    assert_eq!(admin.update_shipping_rates(&rates).await.unwrap(), rates);

    let seen = shilpini_storefront::db::SettingsRepository::new(&pool)
        .shipping_rates()
        .await
        .unwrap();
    assert_eq!(seen, rates);
    assert_eq!(settings_rows(&pool).await, 1);
}
