//! Cart Repositories

use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    carts::models::{Cart, CartUuid},
    users::models::UserEmail,
};

mod carts;
mod items;

pub use carts::PgCartsRepository;

/// Persistence for carts, keyed by the owning user's email.
#[automock]
#[async_trait]
pub trait CartsRepository: Send + Sync {
    /// Find the cart owned by `email`, items included.
    async fn find_by_user_email(&self, email: &UserEmail) -> Result<Option<Cart>, sqlx::Error>;

    /// Create an empty cart owned by `email`.
    async fn create(&self, email: &UserEmail) -> Result<Cart, sqlx::Error>;

    /// Persist `cart`, replacing every stored item with `cart.items`.
    async fn save(&self, cart: &Cart) -> Result<Cart, sqlx::Error>;

    /// Debit `total` from the wallet of `email` and empty `cart` in a single
    /// transaction.
    ///
    /// Returns the new wallet balance, or `None` when the balance no longer
    /// covers `total`, in which case nothing is written.
    async fn settle_checkout(
        &self,
        email: &UserEmail,
        cart: CartUuid,
        total: u64,
    ) -> Result<Option<u64>, sqlx::Error>;
}
