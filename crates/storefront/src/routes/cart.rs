//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Every handler loads it, applies
//! one mutation and writes it back before responding with the updated cart.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use shilpini_core::{AddOutcome, Cart, CartLine, CartLineId, CartStore, ProductId, SelectedOptions};

use crate::db::CatalogRepository;
use crate::error::Result;
use crate::services::{CartInputError, SessionCartStore};
use crate::state::AppState;

/// Cart as returned to the browser.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total_items: u64,
    /// Two-decimal fixed-point string.
    pub total_price: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().to_vec(),
            total_items: cart.total_items(),
            total_price: cart.total_price_display(),
        }
    }
}

/// Response to an add-to-cart request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartResponse {
    /// `added`, `incremented` or `at_stock_limit`.
    pub status: &'static str,
    pub cart_item_id: Option<CartLineId>,
    pub cart: CartView,
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    #[serde(alias = "product_id")]
    pub product_id: ProductId,
    #[serde(default)]
    pub options: SelectedOptions,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    #[serde(alias = "line_id", alias = "cartItemId")]
    pub line_id: CartLineId,
    pub quantity: i64,
}

/// Remove line request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartRequest {
    #[serde(alias = "line_id", alias = "cartItemId")]
    pub line_id: CartLineId,
}

/// Cart count badge.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u64,
}

/// Show the cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = SessionCartStore::new(session).load().await?;
    Ok(Json(CartView::from(&cart)))
}

/// Add one unit of a product with the chosen options.
///
/// The product must exist and be active, and the options must be a complete
/// and valid selection for it. Adding past stock leaves the quantity at the
/// stock level.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<AddToCartResponse>> {
    let catalog = CatalogRepository::new(state.pool());
    let product = catalog
        .get_active_product(request.product_id)
        .await?
        .ok_or(CartInputError::ProductNotFound)?;

    request
        .options
        .validate_against(&product.options)
        .map_err(CartInputError::from)?;

    let category_name = match product.category_id {
        Some(id) => catalog.get_category(id).await?.map(|c| c.name),
        None => None,
    };

    let store = SessionCartStore::new(session);
    let mut cart = store.load().await?;
    let outcome = cart.add_item(product.to_cart_product(category_name), request.options);

    let status = match &outcome {
        AddOutcome::Added(_) => "added",
        AddOutcome::Incremented { .. } => "incremented",
        AddOutcome::AtStockLimit { .. } => "at_stock_limit",
        AddOutcome::OutOfStock => return Err(CartInputError::OutOfStock.into()),
    };

    store.save(&cart).await?;
    tracing::debug!(product_id = %product.id, status, "Cart updated");

    Ok(Json(AddToCartResponse {
        status,
        cart_item_id: outcome.line_id().cloned(),
        cart: CartView::from(&cart),
    }))
}

/// Set a line's quantity; zero or less removes it.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    mutate(session, |cart| {
        cart.update_quantity(&request.line_id, request.quantity);
    })
    .await
}

/// Remove a line.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    mutate(session, |cart| cart.remove_item(&request.line_id)).await
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    mutate(session, Cart::clear).await
}

/// Number of items in the cart.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CartCount>> {
    let cart = SessionCartStore::new(session).load().await?;
    Ok(Json(CartCount {
        count: cart.total_items(),
    }))
}

async fn mutate(session: Session, f: impl FnOnce(&mut Cart)) -> Result<Json<CartView>> {
    let store = SessionCartStore::new(session);
    let mut cart = store.load().await?;
    f(&mut cart);
    store.save(&cart).await?;
    Ok(Json(CartView::from(&cart)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_request_accepts_both_spellings() {
        let camel: AddToCartRequest =
            serde_json::from_str(r#"{"productId": 3, "options": {"Size": "M"}}"#).unwrap();
        let snake: AddToCartRequest = serde_json::from_str(r#"{"product_id": 3}"#).unwrap();

        assert_eq!(camel.product_id, ProductId::new(3));
        assert_eq!(camel.options.get("Size"), Some("M"));
        assert!(snake.options.is_empty());
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::new());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["totalItems"], 0);
        assert_eq!(json["totalPrice"], "0.00");
        assert_eq!(json["items"].as_array().unwrap().len(), 0);
    }
}
