//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        carts::{CartsService, DefaultCartsService, repositories::PgCartsRepository},
        products::PgProductsRepository,
        users::{PgUsersRepository, UsersRepository},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
    pub users: Arc<dyn UsersRepository>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool)))
    }

    /// Wire the Postgres-backed repositories and services over an existing pool.
    #[must_use]
    pub fn from_db(db: Db) -> Self {
        let carts = DefaultCartsService::new(
            Arc::new(PgCartsRepository::new(db.clone())),
            Arc::new(PgProductsRepository::new(db.clone())),
        );

        Self {
            carts: Arc::new(carts),
            users: Arc::new(PgUsersRepository::new(db)),
        }
    }

    /// Connect and bring the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or applying migrations fails.
    pub async fn migrate(url: &str) -> Result<(), AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
