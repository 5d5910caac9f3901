//! Product Data

use crate::domain::products::records::ProductUuid;

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub category: String,
    pub image: Option<String>,
}
