//! Test Helpers

use sqlx::query;

use crate::{
    database::to_db_amount,
    domain::{
        products::models::{Product, ProductUuid},
        users::models::UserEmail,
    },
    test::TestContext,
};

/// Insert a user account directly; accounts are owned outside this crate.
pub(crate) async fn create_user(
    ctx: &TestContext,
    email: &str,
    wallet_money: u64,
    address: &str,
) -> Result<UserEmail, sqlx::Error> {
    query("INSERT INTO users (email, wallet_money, address) VALUES ($1, $2, $3)")
        .bind(email)
        .bind(to_db_amount(wallet_money, "wallet_money")?)
        .bind(address)
        .execute(ctx.db.pool())
        .await?;

    Ok(UserEmail::new(email))
}

/// Insert a catalog product directly.
pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    cost: u64,
) -> Result<Product, sqlx::Error> {
    let product = Product {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        cost,
    };

    query("INSERT INTO products (uuid, name, cost) VALUES ($1, $2, $3)")
        .bind(product.uuid.into_uuid())
        .bind(&product.name)
        .bind(to_db_amount(cost, "cost")?)
        .execute(ctx.db.pool())
        .await?;

    Ok(product)
}
