//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::accounts::records::AccountUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    /// Owning seller.
    pub seller: AccountUuid,
    pub category: String,
    pub name: String,
    pub image: Option<String>,
    /// Average review rating, maintained outside the purchase flow.
    pub rating: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
