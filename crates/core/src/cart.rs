//! Shopping cart engine.
//!
//! A cart is an ordered list of [`CartLine`]s. Two additions land on the same
//! line exactly when they name the same product and the same
//! [`SelectedOptions`]; otherwise each distinct option selection gets its own
//! line with its own opaque [`CartLineId`].
//!
//! The engine does no I/O. Callers load a cart through a [`CartStore`],
//! mutate it, and save it back after every mutation.
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use shilpini_core::{AddOutcome, Cart, CartProduct, ProductId, SelectedOptions};
//!
//! let kurti = CartProduct {
//!     product_id: ProductId::new(1),
//!     name: "Block Print Kurti".to_owned(),
//!     price: Decimal::new(50_000, 2),
//!     featured_image: None,
//!     stock: 5,
//!     category_name: None,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_item(kurti.clone(), SelectedOptions::new().with("Size", "M"));
//! cart.add_item(kurti, SelectedOptions::new().with("Size", "M"));
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_price_display(), "1000.00");
//! ```

use std::convert::Infallible;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ProductId, SelectedOptions, format_amount};

/// Opaque identifier of one cart line.
///
/// Distinct from the product id so the same product can appear on several
/// lines with different option selections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartLineId(String);

impl CartLineId {
    /// Generate a fresh random line id.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CartLineId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CartLineId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl std::fmt::Display for CartLineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The product fields a cart line snapshots when it is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartProduct {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub featured_image: Option<String>,
    pub stock: u32,
    pub category_name: Option<String>,
}

/// One distinct (product, options) entry in the cart.
///
/// Price, stock and image are copied from the product when the line is
/// created and are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(rename = "cartItemId")]
    pub line_id: CartLineId,
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub featured_image: Option<String>,
    pub quantity: u32,
    pub stock: u32,
    pub category_name: Option<String>,
    #[serde(default)]
    pub selected_options: SelectedOptions,
}

impl CartLine {
    fn new(product: CartProduct, selected_options: SelectedOptions) -> Self {
        Self {
            line_id: CartLineId::generate(),
            product_id: product.product_id,
            name: product.name,
            price: product.price,
            featured_image: product.featured_image,
            quantity: 1,
            stock: product.stock,
            category_name: product.category_name,
            selected_options,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    fn matches(&self, product_id: ProductId, options: &SelectedOptions) -> bool {
        self.product_id == product_id && self.selected_options == *options
    }
}

/// A cart line as found in storage.
///
/// Older carts were saved without a line id and may carry quantities outside
/// the line's stock; [`Cart::from_stored_lines`] repairs both.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCartLine {
    #[serde(rename = "cartItemId", default)]
    pub line_id: Option<CartLineId>,
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub featured_image: Option<String>,
    pub quantity: i64,
    pub stock: i64,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub selected_options: SelectedOptions,
}

/// Result of [`Cart::add_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was created with quantity 1.
    Added(CartLineId),
    /// An existing line's quantity went up by one.
    Incremented { line_id: CartLineId, quantity: u32 },
    /// An existing line is already at its stock; nothing changed.
    AtStockLimit { line_id: CartLineId, quantity: u32 },
    /// The product has no stock; nothing changed.
    OutOfStock,
}

impl AddOutcome {
    /// The line the addition landed on, if any.
    #[must_use]
    pub const fn line_id(&self) -> Option<&CartLineId> {
        match self {
            Self::Added(id)
            | Self::Incremented { line_id: id, .. }
            | Self::AtStockLimit { line_id: id, .. } => Some(id),
            Self::OutOfStock => None,
        }
    }
}

/// The shopping cart.
///
/// Serializes as a plain JSON array of lines. Deserialization goes through
/// [`Cart::from_stored_lines`], so legacy records are migrated on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let stored = Vec::<StoredCartLine>::deserialize(deserializer)?;
        Ok(Self::from_stored_lines(stored))
    }
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rebuild a cart from stored records.
    ///
    /// Records without a line id get a fresh one. Quantities are clamped to
    /// the recorded stock, and lines left with nothing orderable are dropped.
    #[must_use]
    pub fn from_stored_lines(stored: Vec<StoredCartLine>) -> Self {
        let lines = stored
            .into_iter()
            .filter_map(|line| {
                let stock = u32::try_from(line.stock).unwrap_or(0);
                let quantity = u32::try_from(line.quantity.min(i64::from(stock))).unwrap_or(0);
                if quantity == 0 {
                    return None;
                }
                Some(CartLine {
                    line_id: line.line_id.unwrap_or_else(CartLineId::generate),
                    product_id: line.product_id,
                    name: line.name,
                    price: line.price,
                    featured_image: line.featured_image,
                    quantity,
                    stock,
                    category_name: line.category_name,
                    selected_options: line.selected_options,
                })
            })
            .collect();
        Self { lines }
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, line_id: &CartLineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.line_id == *line_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Add one unit of `product` with the given option selection.
    ///
    /// Lands on the existing line for the same product and options when there
    /// is one, never raising its quantity past the line's stock.
    pub fn add_item(&mut self, product: CartProduct, options: SelectedOptions) -> AddOutcome {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.matches(product.product_id, &options))
        {
            if line.quantity >= line.stock {
                return AddOutcome::AtStockLimit {
                    line_id: line.line_id.clone(),
                    quantity: line.quantity,
                };
            }
            line.quantity += 1;
            return AddOutcome::Incremented {
                line_id: line.line_id.clone(),
                quantity: line.quantity,
            };
        }

        if product.stock == 0 {
            return AddOutcome::OutOfStock;
        }

        let line = CartLine::new(product, options);
        let line_id = line.line_id.clone();
        self.lines.push(line);
        AddOutcome::Added(line_id)
    }

    /// Remove a line. Removing an unknown line does nothing.
    pub fn remove_item(&mut self, line_id: &CartLineId) {
        self.lines.retain(|l| l.line_id != *line_id);
    }

    /// Set a line's quantity, clamped to its stock.
    ///
    /// A quantity of zero or less removes the line. Unknown ids are ignored.
    pub fn update_quantity(&mut self, line_id: &CartLineId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(line_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.line_id == *line_id) {
            let clamped = quantity.min(i64::from(line.stock));
            line.quantity = u32::try_from(clamped).unwrap_or(line.stock);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// [`total_price`](Self::total_price) with exactly two decimal places.
    #[must_use]
    pub fn total_price_display(&self) -> String {
        format_amount(self.total_price())
    }
}

/// Where a cart lives between requests.
///
/// Implementations persist the whole cart on every save; there is no partial
/// update.
pub trait CartStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the current cart, or an empty one if nothing is stored.
    fn load(&self) -> impl Future<Output = Result<Cart, Self::Error>> + Send;

    /// Replace the stored cart.
    fn save(&self, cart: &Cart) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// In-process cart store.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    cart: Mutex<Cart>,
}

impl MemoryCartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot(&self) -> Cart {
        self.cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, cart: &Cart) {
        *self.cart.lock().unwrap_or_else(PoisonError::into_inner) = cart.clone();
    }
}

impl CartStore for MemoryCartStore {
    type Error = Infallible;

    async fn load(&self) -> Result<Cart, Self::Error> {
        Ok(self.snapshot())
    }

    async fn save(&self, cart: &Cart) -> Result<(), Self::Error> {
        self.replace(cart);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i32, price: Decimal, stock: u32) -> CartProduct {
        CartProduct {
            product_id: ProductId::new(id),
            name: format!("Product {id}"),
            price,
            featured_image: Some(format!("https://i.ibb.co/p{id}.jpg")),
            stock,
            category_name: Some("Kurti".to_owned()),
        }
    }

    fn size(value: &str) -> SelectedOptions {
        SelectedOptions::new().with("Size", value)
    }

    #[test]
    fn test_same_options_merge_and_clamp_at_stock() {
        let mut cart = Cart::new();
        let p = product(1, Decimal::from(500), 3);

        for _ in 0..5 {
            cart.add_item(p.clone(), size("M"));
        }

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_add_reports_outcome() {
        let mut cart = Cart::new();
        let p = product(1, Decimal::from(500), 2);

        let first = cart.add_item(p.clone(), size("M"));
        let line_id = first.line_id().cloned().unwrap();
        assert!(matches!(first, AddOutcome::Added(_)));
        assert_eq!(
            cart.add_item(p.clone(), size("M")),
            AddOutcome::Incremented {
                line_id: line_id.clone(),
                quantity: 2
            }
        );
        assert_eq!(
            cart.add_item(p, size("M")),
            AddOutcome::AtStockLimit {
                line_id,
                quantity: 2
            }
        );
    }

    #[test]
    fn test_option_order_does_not_split_lines() {
        let mut cart = Cart::new();
        let p = product(1, Decimal::from(500), 10);

        cart.add_item(
            p.clone(),
            SelectedOptions::new().with("Size", "M").with("Color", "Red"),
        );
        cart.add_item(
            p,
            SelectedOptions::new().with("Color", "Red").with("Size", "M"),
        );

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_different_options_get_distinct_lines() {
        let mut cart = Cart::new();
        let p = product(1, Decimal::from(500), 10);

        cart.add_item(p.clone(), size("S"));
        cart.add_item(p.clone(), size("M"));
        cart.add_item(p.clone(), size("L"));
        cart.add_item(p, size("M"));

        assert_eq!(cart.len(), 3);
        let ids: std::collections::HashSet<_> =
            cart.lines().iter().map(|l| l.line_id.clone()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_out_of_stock_product_is_not_added() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add_item(product(1, Decimal::from(500), 0), SelectedOptions::new()),
            AddOutcome::OutOfStock
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_zero_equals_remove() {
        let mut a = Cart::new();
        let id = a
            .add_item(product(1, Decimal::from(500), 5), size("M"))
            .line_id()
            .cloned()
            .unwrap();
        a.add_item(product(2, Decimal::from(300), 5), SelectedOptions::new());
        let mut b = a.clone();

        a.update_quantity(&id, 0);
        b.remove_item(&id);

        assert_eq!(a, b);
        assert_eq!(a.len(), 1);

        let mut c = b.clone();
        c.update_quantity(&c.lines()[0].line_id.clone(), -3);
        assert!(c.is_empty());
    }

    #[test]
    fn test_update_quantity_clamps_to_stock() {
        let mut cart = Cart::new();
        let id = cart
            .add_item(product(1, Decimal::from(500), 4), SelectedOptions::new())
            .line_id()
            .cloned()
            .unwrap();

        cart.update_quantity(&id, 99);
        assert_eq!(cart.line(&id).unwrap().quantity, 4);

        cart.update_quantity(&id, 2);
        assert_eq!(cart.line(&id).unwrap().quantity, 2);
    }

    #[test]
    fn test_unknown_line_is_ignored() {
        let mut cart = Cart::new();
        cart.add_item(product(1, Decimal::from(500), 4), SelectedOptions::new());
        let before = cart.clone();

        let missing = CartLineId::from("missing");
        cart.update_quantity(&missing, 2);
        cart.remove_item(&missing);
        cart.remove_item(&missing);

        assert_eq!(cart, before);
    }

    #[test]
    fn test_total_price_has_two_decimals() {
        let mut cart = Cart::new();
        let id = cart
            .add_item(product(1, Decimal::new(1999, 2), 10), SelectedOptions::new())
            .line_id()
            .cloned()
            .unwrap();
        cart.update_quantity(&id, 3);
        cart.add_item(product(2, Decimal::new(1, 1), 10), SelectedOptions::new());
        cart.add_item(product(3, Decimal::new(2, 1), 10), SelectedOptions::new());

        assert_eq!(cart.total_price(), Decimal::new(6027, 2));
        assert_eq!(cart.total_price_display(), "60.27");
        assert_eq!(Cart::new().total_price_display(), "0.00");
    }

    #[test]
    fn test_two_sizes_total_1500() {
        let mut cart = Cart::new();
        let p1 = product(1, Decimal::new(50_000, 2), 10);

        cart.add_item(p1.clone(), size("M"));
        cart.add_item(p1.clone(), size("M"));
        cart.add_item(p1, size("L"));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price_display(), "1500.00");
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(product(1, Decimal::from(500), 4), SelectedOptions::new());
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_stored_json_shape() {
        let mut cart = Cart::new();
        cart.add_item(product(7, Decimal::new(120_000, 2), 3), size("M"));

        let json = serde_json::to_value(&cart).unwrap();
        let line = &json[0];
        assert!(line["cartItemId"].is_string());
        assert_eq!(line["id"], 7);
        assert_eq!(line["price"], "1200.00");
        assert_eq!(line["featuredImage"], "https://i.ibb.co/p7.jpg");
        assert_eq!(line["selectedOptions"]["Size"], "M");
    }

    #[test]
    fn test_legacy_lines_get_ids_and_clamped_quantities() {
        let json = r#"[
            {"id": 1, "name": "Saree", "price": "2500", "quantity": 9, "stock": 4},
            {"id": 2, "name": "Kurti", "price": "800", "quantity": 1, "stock": 0},
            {"cartItemId": "keep-me", "id": 3, "name": "Set", "price": "1200",
             "quantity": 2, "stock": 5, "selectedOptions": {"Size": "L"}}
        ]"#;

        let cart: Cart = serde_json::from_str(json).unwrap();

        assert_eq!(cart.len(), 2);
        let saree = &cart.lines()[0];
        assert!(!saree.line_id.as_str().is_empty());
        assert_eq!(saree.quantity, 4);
        assert_eq!(cart.lines()[1].line_id, CartLineId::from("keep-me"));
        assert_eq!(cart.lines()[1].selected_options.get("Size"), Some("L"));
    }

    #[test]
    fn test_round_trip_preserves_line_ids() {
        let mut cart = Cart::new();
        cart.add_item(product(1, Decimal::from(500), 4), size("S"));
        cart.add_item(product(1, Decimal::from(500), 4), size("M"));

        let restored: Cart = serde_json::from_str(&serde_json::to_string(&cart).unwrap()).unwrap();
        assert_eq!(restored, cart);
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryCartStore::new();
        assert!(store.load().await.unwrap().is_empty());

        let mut cart = store.load().await.unwrap();
        cart.add_item(product(1, Decimal::from(500), 4), SelectedOptions::new());
        store.save(&cart).await.unwrap();

        assert_eq!(store.load().await.unwrap().total_items(), 1);
    }
}
