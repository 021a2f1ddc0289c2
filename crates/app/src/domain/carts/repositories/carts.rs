//! Carts Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{Db, to_db_amount},
    domain::{
        carts::{
            models::{Cart, CartUuid},
            repositories::{CartsRepository, items::PgCartItemsRepository},
        },
        users::models::UserEmail,
    },
};

const FIND_CART_BY_EMAIL_SQL: &str = include_str!("../sql/find_cart_by_email.sql");
const CREATE_CART_SQL: &str = include_str!("../sql/create_cart.sql");
const TOUCH_CART_SQL: &str = include_str!("../sql/touch_cart.sql");
const DEBIT_WALLET_SQL: &str = include_str!("../sql/debit_wallet.sql");

/// PostgreSQL-backed carts repository.
#[derive(Debug, Clone)]
pub struct PgCartsRepository {
    db: Db,
    items: PgCartItemsRepository,
}

impl PgCartsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsRepository for PgCartsRepository {
    async fn find_by_user_email(&self, email: &UserEmail) -> Result<Option<Cart>, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let cart = query_as::<Postgres, Cart>(FIND_CART_BY_EMAIL_SQL)
            .bind(email.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let cart = match cart {
            Some(mut cart) => {
                cart.items = self.items.get_cart_items(&mut tx, cart.uuid).await?;

                Some(cart)
            }
            None => None,
        };

        tx.commit().await?;

        Ok(cart)
    }

    async fn create(&self, email: &UserEmail) -> Result<Cart, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let cart = query_as::<Postgres, Cart>(CREATE_CART_SQL)
            .bind(CartUuid::new().into_uuid())
            .bind(email.as_str())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn save(&self, cart: &Cart) -> Result<Cart, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        self.items
            .replace_cart_items(&mut tx, cart.uuid, &cart.items)
            .await?;

        let mut saved = query_as::<Postgres, Cart>(TOUCH_CART_SQL)
            .bind(cart.uuid.into_uuid())
            .fetch_one(&mut *tx)
            .await?;

        saved.items = self.items.get_cart_items(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(saved)
    }

    async fn settle_checkout(
        &self,
        email: &UserEmail,
        cart: CartUuid,
        total: u64,
    ) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let balance = query_scalar::<Postgres, i64>(DEBIT_WALLET_SQL)
            .bind(email.as_str())
            .bind(to_db_amount(total, "wallet_money")?)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(balance) = balance else {
            tx.rollback().await?;

            return Ok(None);
        };

        self.items.clear_cart_items(&mut tx, cart).await?;

        query(TOUCH_CART_SQL)
            .bind(cart.into_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let balance = u64::try_from(balance).map_err(|e| sqlx::Error::ColumnDecode {
            index: "wallet_money".to_string(),
            source: Box::new(e),
        })?;

        Ok(Some(balance))
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            email: UserEmail::new(row.try_get::<String, _>("user_email")?),
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
