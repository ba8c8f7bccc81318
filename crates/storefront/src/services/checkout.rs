//! Checkout: turns the cart and the customer's delivery details into an order.
//!
//! Validation and order composition are pure functions so the totals can be
//! checked without a database. [`place_order`] adds persistence, clears the
//! cart and queues the notification email.

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use shilpini_core::{
    Cart, CartStore, DeliveryLocation, District, DistrictError, NewOrder, NewOrderItem, Phone,
    PhoneError, ShippingRates,
};

use crate::db::{OrderRepository, PlacedOrder, SettingsRepository};
use crate::error::AppError;
use crate::services::email::OrderNotification;
use crate::state::AppState;

/// Checkout form as submitted by the customer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub district: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Customer's own choice; overridden by the district.
    #[serde(default)]
    pub delivery_location: Option<DeliveryLocation>,
}

/// Why a checkout was rejected. Each message is shown to the customer as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("Please enter your name")]
    MissingName,
    #[error(transparent)]
    Phone(#[from] PhoneError),
    #[error("Please enter your delivery address")]
    MissingAddress,
    #[error(transparent)]
    District(#[from] DistrictError),
}

/// Validated delivery details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryDetails {
    pub name: String,
    pub phone: Phone,
    pub address: String,
    pub district: District,
    pub notes: Option<String>,
    pub location: DeliveryLocation,
}

impl DeliveryDetails {
    /// Full address as stored on the order: `"{address}, {district}"`.
    #[must_use]
    pub fn full_address(&self) -> String {
        format!("{}, {}", self.address, self.district)
    }
}

/// Validate the cart and form, in the order the customer should see errors.
///
/// # Errors
///
/// Returns the first [`CheckoutError`] that applies.
pub fn validate(cart: &Cart, form: &CheckoutForm) -> Result<DeliveryDetails, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let name = form.name.trim();
    if name.is_empty() {
        return Err(CheckoutError::MissingName);
    }

    let phone = Phone::parse(&form.phone)?;

    let address = form.address.trim();
    if address.is_empty() {
        return Err(CheckoutError::MissingAddress);
    }

    let district = District::parse(&form.district)?;
    let location = DeliveryLocation::resolve(Some(&district), form.delivery_location);

    let notes = form
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_owned);

    Ok(DeliveryDetails {
        name: name.to_owned(),
        phone,
        address: address.to_owned(),
        district,
        notes,
        location,
    })
}

/// Build the order for a validated checkout.
///
/// `subtotal` is the cart total, shipping is the rate for the resolved
/// location, and `total = subtotal + shipping`.
#[must_use]
pub fn compose_order(cart: &Cart, details: &DeliveryDetails, rates: &ShippingRates) -> NewOrder {
    let subtotal = cart.total_price();
    let shipping_cost = rates.rate_for(details.location);
    let discount = Decimal::ZERO;

    NewOrder {
        customer_name: details.name.clone(),
        customer_phone: details.phone.as_str().to_owned(),
        address: details.full_address(),
        notes: details.notes.clone(),
        subtotal,
        shipping_cost,
        discount,
        total: subtotal + shipping_cost - discount,
        items: cart.lines().iter().map(NewOrderItem::from).collect(),
    }
}

/// Place an order from the cart in `store`.
///
/// On success the shop is notified in the background and the cart is
/// cleared. Once the order is committed the call succeeds: a failed
/// notification or cart write is logged and does not affect the order.
///
/// # Errors
///
/// Returns `AppError::Checkout` for invalid input, or a database/session
/// error if loading the cart or persisting the order fails. Nothing is
/// written and the cart is left untouched on error.
#[instrument(skip(state, store, form))]
pub async fn place_order<S>(
    state: &AppState,
    store: &S,
    form: &CheckoutForm,
) -> Result<PlacedOrder, AppError>
where
    S: CartStore,
    AppError: From<S::Error>,
{
    let cart = store.load().await?;
    let details = validate(&cart, form)?;

    let rates = SettingsRepository::new(state.pool()).shipping_rates().await?;
    let order = compose_order(&cart, &details, &rates);

    let placed = OrderRepository::new(state.pool()).create(&order).await?;

    for line in &placed.oversold {
        tracing::warn!(
            order_number = %placed.order_number,
            product_id = %line.product_id,
            ordered = line.ordered,
            in_stock = line.in_stock,
            "Order exceeds live stock"
        );
    }

    tracing::info!(
        order_number = %placed.order_number,
        total = %order.total,
        location = ?details.location,
        "Order placed"
    );

    notify_shop(state, &placed.order_number, &order);
    clear_cart(store, cart, &placed.order_number).await;

    Ok(placed)
}

/// Empty the cart after a committed order. A failed write leaves the old
/// cart in place and is only logged.
async fn clear_cart<S>(store: &S, mut cart: Cart, order_number: &str)
where
    S: CartStore,
    AppError: From<S::Error>,
{
    cart.clear();
    if let Err(e) = store.save(&cart).await {
        tracing::warn!(
            error = %AppError::from(e),
            order_number,
            "Failed to clear cart after order"
        );
    }
}

/// Send the new-order email in the background, if email is enabled.
fn notify_shop(state: &AppState, order_number: &str, order: &NewOrder) {
    let Some(email) = state.email().cloned() else {
        tracing::debug!(order_number, "Order email skipped, SMTP not configured");
        return;
    };

    let notification = OrderNotification::new(order_number, order);
    tokio::spawn(async move {
        if let Err(e) = email.send_order_notification(&notification).await {
            tracing::error!(
                error = %e,
                order_number = %notification.order_number,
                "Failed to send order notification"
            );
        }
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shilpini_core::{CartProduct, MemoryCartStore, ProductId, SelectedOptions};

    use super::*;

    /// Loads a fixed cart and fails every write.
    struct ReadOnlyCartStore(Cart);

    impl CartStore for ReadOnlyCartStore {
        type Error = AppError;

        async fn load(&self) -> Result<Cart, Self::Error> {
            Ok(self.0.clone())
        }

        async fn save(&self, _cart: &Cart) -> Result<(), Self::Error> {
            Err(AppError::Internal("session store unavailable".to_owned()))
        }
    }

    fn form(district: &str, location: Option<DeliveryLocation>) -> CheckoutForm {
        CheckoutForm {
            name: " Nusrat Jahan ".to_owned(),
            phone: "017-1234-5678".to_owned(),
            address: "Flat 3B, Zindabazar".to_owned(),
            district: district.to_owned(),
            notes: Some("  ".to_owned()),
            delivery_location: location,
        }
    }

    fn p1() -> CartProduct {
        CartProduct {
            product_id: ProductId::new(1),
            name: "Hand Block Kurti".to_owned(),
            price: Decimal::new(50_000, 2),
            featured_image: Some("https://i.ibb.co/kurti.jpg".to_owned()),
            stock: 10,
            category_name: Some("Kurti".to_owned()),
        }
    }

    /// Two lines of one product: Size M x2 and Size L x1, at 500.00 each.
    fn two_size_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(p1(), SelectedOptions::new().with("Size", "M"));
        cart.add_item(p1(), SelectedOptions::new().with("Size", "M"));
        cart.add_item(p1(), SelectedOptions::new().with("Size", "L"));
        cart
    }

    #[test]
    fn test_empty_cart_rejected_first() {
        let err = validate(&Cart::new(), &CheckoutForm::default()).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[test]
    fn test_validation_order() {
        let cart = two_size_cart();

        let mut f = form("Dhaka", None);
        f.name = "   ".to_owned();
        f.phone = "2712345678".to_owned();
        assert_eq!(validate(&cart, &f).unwrap_err(), CheckoutError::MissingName);

        f.name = "Nusrat".to_owned();
        assert_eq!(
            validate(&cart, &f).unwrap_err(),
            CheckoutError::Phone(PhoneError::MissingPrefix)
        );

        f.phone = "01712345678".to_owned();
        f.address = String::new();
        assert_eq!(validate(&cart, &f).unwrap_err(), CheckoutError::MissingAddress);

        f.address = "Mirpur 10".to_owned();
        f.district = "Gotham".to_owned();
        assert_eq!(
            validate(&cart, &f).unwrap_err(),
            CheckoutError::District(DistrictError)
        );
    }

    #[test]
    fn test_phone_errors_are_specific() {
        let cart = two_size_cart();
        let mut f = form("Dhaka", None);

        f.phone = "017123".to_owned();
        assert_eq!(
            validate(&cart, &f).unwrap_err().to_string(),
            "Phone number must be 11 digits"
        );

        f.phone = "01212345678".to_owned();
        assert_eq!(
            validate(&cart, &f).unwrap_err().to_string(),
            "Invalid operator code (must be 013-019)"
        );
    }

    #[test]
    fn test_district_forces_location() {
        let cart = two_size_cart();

        let inside = validate(&cart, &form("dhaka", Some(DeliveryLocation::Outside))).unwrap();
        assert_eq!(inside.location, DeliveryLocation::Inside);

        let outside = validate(&cart, &form("Sylhet", Some(DeliveryLocation::Inside))).unwrap();
        assert_eq!(outside.location, DeliveryLocation::Outside);
    }

    #[test]
    fn test_total_is_subtotal_plus_rate() {
        let cart = two_size_cart();
        let rates = ShippingRates::new(Decimal::from(60), Decimal::from(150)).unwrap();

        for (district, rate) in [("Dhaka", 60), ("Khulna", 150)] {
            let details = validate(&cart, &form(district, None)).unwrap();
            let order = compose_order(&cart, &details, &rates);

            assert_eq!(order.subtotal, cart.total_price());
            assert_eq!(order.shipping_cost, Decimal::from(rate));
            assert_eq!(order.total, cart.total_price() + Decimal::from(rate));
            assert!(order.totals_consistent());
        }
    }

    #[test]
    fn test_two_sizes_outside_dhaka_totals_1680() {
        let cart = two_size_cart();
        assert_eq!(cart.total_price_display(), "1500.00");

        let details = validate(&cart, &form("Sylhet", Some(DeliveryLocation::Outside))).unwrap();
        let order = compose_order(&cart, &details, &ShippingRates::default());

        assert_eq!(order.subtotal, Decimal::new(150_000, 2));
        assert_eq!(order.shipping_cost, Decimal::from(180));
        assert_eq!(order.total, Decimal::new(168_000, 2));
        assert_eq!(order.items.len(), 2);
    }

    #[test]
    fn test_order_snapshots_and_address() {
        let cart = two_size_cart();
        let details = validate(&cart, &form("Sylhet", None)).unwrap();
        let order = compose_order(&cart, &details, &ShippingRates::default());

        assert_eq!(order.customer_name, "Nusrat Jahan");
        assert_eq!(order.customer_phone, "01712345678");
        assert_eq!(order.address, "Flat 3B, Zindabazar, Sylhet");
        assert_eq!(order.notes, None);

        let first = &order.items[0];
        assert_eq!(first.product_name, "Hand Block Kurti");
        assert_eq!(first.quantity, 2);
        assert_eq!(first.selected_options.get("Size"), Some("M"));
        assert_eq!(
            first.product_image.as_deref(),
            Some("https://i.ibb.co/kurti.jpg")
        );
    }

    #[tokio::test]
    async fn test_clear_cart_empties_store() {
        let store = MemoryCartStore::new();
        store.save(&two_size_cart()).await.unwrap();

        clear_cart(&store, store.load().await.unwrap(), "SHILP1001").await;

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_cart_failure_is_not_an_error() {
        let store = ReadOnlyCartStore(two_size_cart());

        // Returns normally; the committed order stands.
        clear_cart(&store, store.load().await.unwrap(), "SHILP1002").await;

        assert_eq!(store.load().await.unwrap().total_items(), 3);
    }
}
