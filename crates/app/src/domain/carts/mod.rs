//! Carts

pub mod errors;
pub mod models;
pub mod repositories;
pub mod service;

pub use errors::{CartsServiceError, ErrorKind};
pub use service::*;
