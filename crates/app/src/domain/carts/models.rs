//! Cart Models

use jiff::Timestamp;
use serde::Serialize;

use crate::{
    domain::{
        products::models::{Product, ProductUuid},
        users::models::UserEmail,
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Cart Model
///
/// Each user owns at most one cart, looked up by email. Items keep their
/// insertion order and never share a product id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cart {
    pub uuid: CartUuid,
    pub email: UserEmail,
    pub items: Vec<CartItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// CartItem Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    /// Product as it was when the item was added.
    pub product: Product,
    pub quantity: u32,
}

impl Cart {
    /// Index of the item holding `product`, if any.
    #[must_use]
    pub fn position_of(&self, product: ProductUuid) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product.uuid == product)
    }

    #[must_use]
    pub fn contains_product(&self, product: ProductUuid) -> bool {
        self.position_of(product).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item. Returns `false`, leaving the cart untouched, when the
    /// product is already present.
    #[must_use]
    pub fn push_item(&mut self, item: CartItem) -> bool {
        if self.contains_product(item.product.uuid) {
            return false;
        }

        self.items.push(item);

        true
    }

    /// Replace the quantity of the item holding `product`. Returns `false`
    /// when the product is not in the cart.
    #[must_use]
    pub fn set_quantity(&mut self, product: ProductUuid, quantity: u32) -> bool {
        match self
            .items
            .iter_mut()
            .find(|item| item.product.uuid == product)
        {
            Some(item) => {
                item.quantity = quantity;

                true
            }
            None => false,
        }
    }

    /// Remove the first item holding `product`.
    pub fn remove_product(&mut self, product: ProductUuid) -> Option<CartItem> {
        self.position_of(product)
            .map(|position| self.items.remove(position))
    }

    /// Sum of `cost * quantity` over all items.
    #[must_use]
    pub fn total(&self) -> u128 {
        self.items
            .iter()
            .map(|item| u128::from(item.product.cost) * u128::from(item.quantity))
            .sum()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
