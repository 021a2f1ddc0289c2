//! Carts service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::domain::{
    carts::{
        errors::CartsServiceError,
        models::{Cart, CartItem},
        repositories::CartsRepository,
    },
    products::{ProductsRepository, models::ProductUuid},
    users::models::User,
};

/// Cart service backed by any cart store and product catalog.
#[derive(Clone)]
pub struct DefaultCartsService {
    carts: Arc<dyn CartsRepository>,
    products: Arc<dyn ProductsRepository>,
}

impl DefaultCartsService {
    #[must_use]
    pub fn new(carts: Arc<dyn CartsRepository>, products: Arc<dyn ProductsRepository>) -> Self {
        Self { carts, products }
    }
}

impl Debug for DefaultCartsService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("DefaultCartsService").finish_non_exhaustive()
    }
}

fn ensure_quantity(quantity: u32) -> Result<(), CartsServiceError> {
    if quantity == 0 {
        return Err(CartsServiceError::InvalidQuantity);
    }

    Ok(())
}

#[async_trait]
impl CartsService for DefaultCartsService {
    #[tracing::instrument(name = "carts.get", skip(self, user), fields(user_email = %user.email))]
    async fn get_cart(&self, user: &User) -> Result<Cart, CartsServiceError> {
        self.carts
            .find_by_user_email(&user.email)
            .await?
            .ok_or(CartsServiceError::NotFound)
    }

    #[tracing::instrument(
        name = "carts.add_product",
        skip(self, user),
        fields(user_email = %user.email, product_uuid = %product)
    )]
    async fn add_product(
        &self,
        user: &User,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        ensure_quantity(quantity)?;

        let mut cart = match self.carts.find_by_user_email(&user.email).await? {
            Some(cart) => cart,
            None => {
                let cart = self
                    .carts
                    .create(&user.email)
                    .await
                    .map_err(CartsServiceError::CartCreation)?;

                debug!(cart_uuid = %cart.uuid, "created cart");

                cart
            }
        };

        if cart.contains_product(product) {
            return Err(CartsServiceError::ProductAlreadyInCart);
        }

        let product = self
            .products
            .find_product(product)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        if !cart.push_item(CartItem { product, quantity }) {
            return Err(CartsServiceError::ProductAlreadyInCart);
        }

        let cart = self.carts.save(&cart).await?;

        info!(cart_uuid = %cart.uuid, quantity, "added product to cart");

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.update_product",
        skip(self, user),
        fields(user_email = %user.email, product_uuid = %product)
    )]
    async fn update_product(
        &self,
        user: &User,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        ensure_quantity(quantity)?;

        let mut cart = self
            .carts
            .find_by_user_email(&user.email)
            .await?
            .ok_or(CartsServiceError::NoCartToUpdate)?;

        if self.products.find_product(product).await?.is_none() {
            return Err(CartsServiceError::ProductNotFound);
        }

        if !cart.set_quantity(product, quantity) {
            return Err(CartsServiceError::ProductNotInCart);
        }

        let cart = self.carts.save(&cart).await?;

        info!(cart_uuid = %cart.uuid, quantity, "updated product quantity");

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.remove_product",
        skip(self, user),
        fields(user_email = %user.email, product_uuid = %product)
    )]
    async fn remove_product(
        &self,
        user: &User,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError> {
        let mut cart = self
            .carts
            .find_by_user_email(&user.email)
            .await?
            .ok_or(CartsServiceError::NoCart)?;

        cart.remove_product(product)
            .ok_or(CartsServiceError::ProductNotInCart)?;

        self.carts.save(&cart).await?;

        info!(cart_uuid = %cart.uuid, "removed product from cart");

        Ok(())
    }

    #[tracing::instrument(name = "carts.checkout", skip(self, user), fields(user_email = %user.email))]
    async fn checkout(&self, user: &mut User) -> Result<(), CartsServiceError> {
        let cart = self
            .carts
            .find_by_user_email(&user.email)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        if cart.is_empty() {
            return Err(CartsServiceError::EmptyCart);
        }

        if !user.has_non_default_address() {
            return Err(CartsServiceError::AddressNotSet);
        }

        let total = cart.total();

        if total > u128::from(user.wallet_money) {
            return Err(CartsServiceError::InsufficientBalance);
        }

        // Bounded by the wallet balance checked above.
        let total = u64::try_from(total).map_err(|_overflow| CartsServiceError::InsufficientBalance)?;

        let balance = self
            .carts
            .settle_checkout(&user.email, cart.uuid, total)
            .await?
            .ok_or(CartsServiceError::InsufficientBalance)?;

        user.wallet_money = balance;

        info!(cart_uuid = %cart.uuid, total, balance, "checked out cart");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart.
    async fn get_cart(&self, user: &User) -> Result<Cart, CartsServiceError>;

    /// Add a product to the user's cart, creating the cart on first use.
    async fn add_product(
        &self,
        user: &User,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Set the quantity of a product already in the user's cart.
    async fn update_product(
        &self,
        user: &User,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove a product from the user's cart.
    async fn remove_product(
        &self,
        user: &User,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError>;

    /// Pay for the cart from the user's wallet and empty it.
    ///
    /// On success `user.wallet_money` reflects the debited balance.
    async fn checkout(&self, user: &mut User) -> Result<(), CartsServiceError>;
}


#[cfg(test)]
mod pg_tests {
    use testresult::TestResult;

    use crate::{
        domain::users::{UsersRepository, models::UserEmail},
        test::{
            TestContext,
            helpers::{create_product, create_user},
        },
    };

    use super::*;

    const EMAIL: &str = "buyer@example.com";

    async fn load_user(ctx: &TestContext, email: &UserEmail) -> TestResult<User> {
        Ok(ctx.users.find_user(email).await?.ok_or("user should exist")?)
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn full_cart_lifecycle() -> TestResult {
        let ctx = TestContext::new().await;
        let email = create_user(&ctx, EMAIL, 100, "42 Main Street").await?;
        let mug = create_product(&ctx, "Mug", 10).await?;
        let pen = create_product(&ctx, "Pen", 5).await?;
        let ink = create_product(&ctx, "Ink", 40).await?;

        let mut buyer = load_user(&ctx, &email).await?;

        let missing = ctx.carts.get_cart(&buyer).await;

        assert!(
            matches!(missing, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {missing:?}"
        );

        ctx.carts.add_product(&buyer, mug.uuid, 1).await?;
        ctx.carts.add_product(&buyer, pen.uuid, 1).await?;
        ctx.carts.add_product(&buyer, ink.uuid, 1).await?;

        let duplicate = ctx.carts.add_product(&buyer, mug.uuid, 5).await;

        assert!(
            matches!(duplicate, Err(CartsServiceError::ProductAlreadyInCart)),
            "expected ProductAlreadyInCart, got {duplicate:?}"
        );

        let cart = ctx.carts.update_product(&buyer, mug.uuid, 2).await?;

        assert_eq!(cart.items.len(), 3);

        ctx.carts.remove_product(&buyer, ink.uuid).await?;

        let cart = ctx.carts.get_cart(&buyer).await?;

        assert_eq!(cart.total(), 25);

        ctx.carts.checkout(&mut buyer).await?;

        let cart = ctx.carts.get_cart(&buyer).await?;
        let stored = load_user(&ctx, &email).await?;

        assert!(cart.items.is_empty());
        assert_eq!(buyer.wallet_money, 75);
        assert_eq!(stored.wallet_money, 75);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn checkout_with_short_balance_keeps_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let email = create_user(&ctx, EMAIL, 20, "42 Main Street").await?;
        let mug = create_product(&ctx, "Mug", 10).await?;
        let pen = create_product(&ctx, "Pen", 5).await?;

        let mut buyer = load_user(&ctx, &email).await?;

        ctx.carts.add_product(&buyer, mug.uuid, 2).await?;
        ctx.carts.add_product(&buyer, pen.uuid, 1).await?;

        let result = ctx.carts.checkout(&mut buyer).await;

        assert!(
            matches!(result, Err(CartsServiceError::InsufficientBalance)),
            "expected InsufficientBalance, got {result:?}"
        );

        let cart = ctx.carts.get_cart(&buyer).await?;
        let stored = load_user(&ctx, &email).await?;

        assert_eq!(cart.items.len(), 2);
        assert_eq!(stored.wallet_money, 20);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn add_product_for_unknown_user_fails_to_create_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let mug = create_product(&ctx, "Mug", 10).await?;

        let ghost = User {
            email: UserEmail::new("ghost@example.com"),
            wallet_money: 0,
            address: "Nowhere".to_string(),
        };

        let result = ctx.carts.add_product(&ghost, mug.uuid, 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::CartCreation(_))),
            "expected CartCreation, got {result:?}"
        );

        Ok(())
    }
}
