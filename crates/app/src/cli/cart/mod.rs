use clap::{Args, Subcommand};
use shopcart_app::{
    context::AppContext,
    domain::{
        carts::{CartsService, CartsServiceError},
        products::models::ProductUuid,
        users::{
            UsersRepository,
            models::{User, UserEmail},
        },
    },
};

use super::config::DatabaseConfig;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Print the user's cart as JSON
    Show(UserArgs),

    /// Add a product to the user's cart
    Add(QuantityArgs),

    /// Change the quantity of a product already in the cart
    Update(QuantityArgs),

    /// Remove a product from the cart
    Remove(ProductArgs),

    /// Pay for the cart from the user's wallet
    Checkout(UserArgs),
}

#[derive(Debug, Args)]
struct UserArgs {
    /// Email of the acting user
    #[arg(long)]
    email: String,
}

#[derive(Debug, Args)]
struct ProductArgs {
    #[command(flatten)]
    user: UserArgs,

    /// Product UUID
    #[arg(long)]
    product: ProductUuid,
}

#[derive(Debug, Args)]
struct QuantityArgs {
    #[command(flatten)]
    product: ProductArgs,

    /// Number of units
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    quantity: u32,
}

pub(crate) async fn run(command: CartCommand) -> Result<(), String> {
    let ctx = AppContext::from_database_url(&command.database.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let output = execute(command.command, ctx.carts.as_ref(), ctx.users.as_ref()).await?;

    println!("{output}");

    Ok(())
}

async fn execute(
    command: CartSubcommand,
    carts: &dyn CartsService,
    users: &dyn UsersRepository,
) -> Result<String, String> {
    match command {
        CartSubcommand::Show(args) => {
            let user = resolve_user(users, &args.email).await?;

            let cart = carts
                .get_cart(&user)
                .await
                .map_err(|error| describe("failed to get cart", &error))?;

            to_json(&cart)
        }
        CartSubcommand::Add(args) => {
            let user = resolve_user(users, &args.product.user.email).await?;

            let cart = carts
                .add_product(&user, args.product.product, args.quantity)
                .await
                .map_err(|error| describe("failed to add product", &error))?;

            to_json(&cart)
        }
        CartSubcommand::Update(args) => {
            let user = resolve_user(users, &args.product.user.email).await?;

            let cart = carts
                .update_product(&user, args.product.product, args.quantity)
                .await
                .map_err(|error| describe("failed to update product", &error))?;

            to_json(&cart)
        }
        CartSubcommand::Remove(args) => {
            let user = resolve_user(users, &args.user.email).await?;

            carts
                .remove_product(&user, args.product)
                .await
                .map_err(|error| describe("failed to remove product", &error))?;

            Ok(format!("removed product {} from cart", args.product))
        }
        CartSubcommand::Checkout(args) => {
            let mut user = resolve_user(users, &args.email).await?;

            carts
                .checkout(&mut user)
                .await
                .map_err(|error| describe("failed to checkout", &error))?;

            Ok(format!(
                "checked out cart for {}\nwallet_money: {}",
                user.email, user.wallet_money
            ))
        }
    }
}

async fn resolve_user(users: &dyn UsersRepository, email: &str) -> Result<User, String> {
    users
        .find_user(&UserEmail::new(email))
        .await
        .map_err(|error| format!("failed to look up user: {error}"))?
        .ok_or_else(|| format!("no user with email {email}"))
}

fn describe(action: &str, error: &CartsServiceError) -> String {
    format!("{action}: {error} (status {})", error.status_code())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|error| format!("failed to encode JSON: {error}"))
}
