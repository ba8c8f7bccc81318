//! Session-backed cart storage.
//!
//! The cart is kept in the visitor's session as the JSON line array the
//! cart engine serializes to, and written back after every mutation.

use thiserror::Error;
use tower_sessions::Session;

use shilpini_core::{Cart, CartStore, OptionSelectionError};

use crate::models::session::keys;

/// Why an add-to-cart request was refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartInputError {
    #[error("Product not found")]
    ProductNotFound,
    #[error(transparent)]
    Options(#[from] OptionSelectionError),
    #[error("This product is out of stock")]
    OutOfStock,
}

/// [`CartStore`] over the visitor's tower-sessions session.
#[derive(Clone)]
pub struct SessionCartStore {
    session: Session,
}

impl SessionCartStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl CartStore for SessionCartStore {
    type Error = tower_sessions::session::Error;

    async fn load(&self) -> Result<Cart, Self::Error> {
        Ok(self
            .session
            .get::<Cart>(keys::CART)
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, cart: &Cart) -> Result<(), Self::Error> {
        if cart.is_empty() {
            self.session.remove::<Cart>(keys::CART).await?;
        } else {
            self.session.insert(keys::CART, cart).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use shilpini_core::{CartProduct, ProductId, SelectedOptions};
    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_cart_survives_save_and_load() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let store = SessionCartStore::new(session.clone());

        let mut cart = store.load().await.unwrap();
        assert!(cart.is_empty());

        cart.add_item(
            CartProduct {
                product_id: ProductId::new(4),
                name: "Three Piece".to_owned(),
                price: Decimal::from(2200),
                featured_image: None,
                stock: 3,
                category_name: None,
            },
            SelectedOptions::new().with("Size", "L"),
        );
        store.save(&cart).await.unwrap();

        let reloaded = SessionCartStore::new(session).load().await.unwrap();
        assert_eq!(reloaded, cart);

        store.save(&shilpini_core::Cart::new()).await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }
}
