//! User Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

/// Address value stored for accounts that never configured a shipping address.
pub const ADDRESS_NOT_SET: &str = "ADDRESS_NOT_SET";

/// User identity. Carts are owned by exactly one email.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserEmail(String);

impl UserEmail {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<String> for UserEmail {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserEmail {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// User account, as far as carts are concerned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub email: UserEmail,
    pub wallet_money: u64,
    pub address: String,
}

impl User {
    /// Whether the user has configured a real shipping address.
    #[must_use]
    pub fn has_non_default_address(&self) -> bool {
        let address = self.address.trim();

        !address.is_empty() && address != ADDRESS_NOT_SET
    }
}
