//! Carts service errors.

use sqlx::Error;
use thiserror::Error;

/// Classification of a service failure, independent of any transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The referenced cart does not exist.
    NotFound,

    /// A business rule rejected the request.
    InvalidRequest,

    /// Persistence failed.
    Internal,
}

impl ErrorKind {
    /// HTTP status code conventionally used for this kind.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::InvalidRequest => 400,
            Self::Internal => 500,
        }
    }
}

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("User does not have a cart")]
    NotFound,

    #[error("User does not have a cart")]
    NoCart,

    #[error("User does not have a cart. Use POST to create cart and add a product")]
    NoCartToUpdate,

    #[error("Product already in cart. Use the cart sidebar to update or remove product from cart")]
    ProductAlreadyInCart,

    #[error("Product doesn't exist in database")]
    ProductNotFound,

    #[error("Product not in cart")]
    ProductNotInCart,

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Cart is empty")]
    EmptyCart,

    #[error("User has no default address set")]
    AddressNotSet,

    #[error("Insufficient Balance")]
    InsufficientBalance,

    #[error("failed to create cart")]
    CartCreation(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl CartsServiceError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::NotFound,
            Self::NoCart
            | Self::NoCartToUpdate
            | Self::ProductAlreadyInCart
            | Self::ProductNotFound
            | Self::ProductNotInCart
            | Self::InvalidQuantity
            | Self::EmptyCart
            | Self::AddressNotSet
            | Self::InsufficientBalance => ErrorKind::InvalidRequest,
            Self::CartCreation(_) | Self::Sql(_) => ErrorKind::Internal,
        }
    }

    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
