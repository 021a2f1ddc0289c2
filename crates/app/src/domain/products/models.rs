//! Product Models

use serde::Serialize;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Catalog product. Carts keep a copy of this taken when the item was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub cost: u64,
}
