//! Users Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::{Db, try_get_amount},
    domain::users::models::{User, UserEmail},
};

const FIND_USER_SQL: &str = include_str!("sql/find_user.sql");

#[automock]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Look up a user account by email.
    async fn find_user(&self, email: &UserEmail) -> Result<Option<User>, sqlx::Error>;
}

/// PostgreSQL-backed users repository.
#[derive(Debug, Clone)]
pub struct PgUsersRepository {
    db: Db,
}

impl PgUsersRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn find_user(&self, email: &UserEmail) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(FIND_USER_SQL)
            .bind(email.as_str())
            .fetch_optional(self.db.pool())
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            email: UserEmail::new(row.try_get::<String, _>("email")?),
            wallet_money: try_get_amount(row, "wallet_money")?,
            address: row.try_get("address")?,
        })
    }
}
