//! Integration tests for the path from admin catalog input to an order.

#![allow(clippy::unwrap_used)]
//!
//! Option groups are validated by the admin form, selections are checked and
//! merged by the core cart, and the storefront checkout composes the order
//! with rates validated by the admin settings form.

use rust_decimal::Decimal;

use shilpini_admin::models::form::{ProductForm, ShippingForm};
use shilpini_core::{
    AddOutcome, CartProduct, CartStore, DeliveryLocation, MemoryCartStore, OptionSelectionError,
    ProductId, ProductOption, SelectedOptions, ShippingRates,
};
use shilpini_storefront::services::CheckoutForm;
use shilpini_storefront::services::checkout::{compose_order, validate};

fn kurti_options() -> Vec<ProductOption> {
    let form: ProductForm = serde_json::from_value(serde_json::json!({
        "name": "Block Print Kurti",
        "price": "1450.00",
        "stock": 3,
        "options": [
            { "name": "Size", "values": ["S", "M", "L"] },
            { "name": "Color", "values": ["Indigo", "Peach"] }
        ]
    }))
    .unwrap_or_else(|e| panic!("product form: {e}"));

    form.validate()
        .ok()
        .and_then(|input| input.options)
        .unwrap_or_default()
}

fn kurti(stock: u32) -> CartProduct {
    CartProduct {
        product_id: ProductId::new(11),
        name: "Block Print Kurti".to_string(),
        price: Decimal::new(145_000, 2),
        featured_image: None,
        stock,
        category_name: Some("Kurti".to_string()),
    }
}

fn rates() -> ShippingRates {
    let form: ShippingForm = serde_json::from_value(serde_json::json!({
        "insideDhakaShipping": "60",
        "outsideDhakaShipping": 150
    }))
    .unwrap_or_else(|e| panic!("shipping form: {e}"));
    form.validate().unwrap_or_default()
}

fn checkout_form(district: &str) -> CheckoutForm {
    CheckoutForm {
        name: "Nusrat Jahan".to_string(),
        phone: "01712345678".to_string(),
        address: "House 4, Road 2".to_string(),
        district: district.to_string(),
        notes: Some("  ".to_string()),
        delivery_location: Some(DeliveryLocation::Inside),
    }
}

// =============================================================================
// Option selection
// =============================================================================

#[test]
fn test_admin_options_drive_selection_checks() {
    let options = kurti_options();
    assert_eq!(options.len(), 2);

    let complete = SelectedOptions::new().with("Size", "M").with("Color", "Peach");
    assert_eq!(complete.validate_against(&options), Ok(()));

    let partial = SelectedOptions::new().with("Size", "M");
    let err = partial.validate_against(&options).unwrap_err();
    assert!(matches!(err, OptionSelectionError::Missing(_)));
    assert_eq!(err.to_string(), "Please select Color");

    let unknown = SelectedOptions::new().with("Size", "XXL").with("Color", "Peach");
    assert!(unknown.validate_against(&options).is_err());
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_same_selection_merges_across_saves() {
    let store = MemoryCartStore::new();

    let mut cart = store.load().await.unwrap_or_default();
    let first = cart.add_item(kurti(5), SelectedOptions::new().with("Size", "M").with("Color", "Peach"));
    assert!(matches!(first, AddOutcome::Added(_)));
    let _ = store.save(&cart).await;

    let mut cart = store.load().await.unwrap_or_default();
    let second = cart.add_item(kurti(5), SelectedOptions::new().with("Color", "Peach").with("Size", "M"));
    assert!(matches!(second, AddOutcome::Incremented { .. }));
    assert_eq!(second.line_id(), first.line_id());

    let third = cart.add_item(kurti(5), SelectedOptions::new().with("Size", "L").with("Color", "Peach"));
    assert!(matches!(third, AddOutcome::Added(_)));

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.total_items(), 3);
    assert_eq!(cart.total_price_display(), "4350.00");
}

#[tokio::test]
async fn test_stock_caps_quantity() {
    let store = MemoryCartStore::new();
    let mut cart = store.load().await.unwrap_or_default();
    let options = SelectedOptions::new().with("Size", "S").with("Color", "Indigo");

    cart.add_item(kurti(2), options.clone());
    cart.add_item(kurti(2), options.clone());
    let capped = cart.add_item(kurti(2), options);

    assert!(matches!(capped, AddOutcome::AtStockLimit { .. }));
    assert_eq!(cart.total_items(), 2);
}

// =============================================================================
// Checkout
// =============================================================================

#[test]
fn test_outside_district_charges_outside_rate() {
    let mut cart = shilpini_core::Cart::new();
    cart.add_item(kurti(5), SelectedOptions::new().with("Size", "M").with("Color", "Peach"));
    cart.add_item(kurti(5), SelectedOptions::new().with("Size", "M").with("Color", "Peach"));

    let details = validate(&cart, &checkout_form("Sylhet")).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(details.location, DeliveryLocation::Outside);
    assert_eq!(details.notes, None);

    let order = compose_order(&cart, &details, &rates());
    assert_eq!(order.subtotal, Decimal::from(2900));
    assert_eq!(order.shipping_cost, Decimal::from(150));
    assert_eq!(order.total, Decimal::from(3050));
    assert!(order.totals_consistent());
    assert_eq!(order.address, "House 4, Road 2, Sylhet");
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items.first().map(|i| i.quantity), Some(2));
}

#[test]
fn test_reference_city_charges_inside_rate() {
    let mut cart = shilpini_core::Cart::new();
    cart.add_item(kurti(5), SelectedOptions::new().with("Size", "S").with("Color", "Indigo"));

    let details = validate(&cart, &checkout_form("dhaka")).unwrap_or_else(|e| panic!("{e}"));
    let order = compose_order(&cart, &details, &rates());

    assert_eq!(order.shipping_cost, Decimal::from(60));
    assert_eq!(order.total, Decimal::from(1510));
}
