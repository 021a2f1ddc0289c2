//! Products Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::{Db, try_get_amount},
    domain::products::models::{Product, ProductUuid},
};

const FIND_PRODUCT_SQL: &str = include_str!("sql/find_product.sql");

/// Read access to the product catalog.
#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// Resolve a product by id, or `None` when the catalog has no such product.
    async fn find_product(&self, product: ProductUuid) -> Result<Option<Product>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    db: Db,
}

impl PgProductsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    async fn find_product(&self, product: ProductUuid) -> Result<Option<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(FIND_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(self.db.pool())
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            cost: try_get_amount(row, "cost")?,
        })
    }
}
