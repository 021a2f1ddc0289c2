//! Shared fixtures for Postgres-backed tests.

mod db;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
