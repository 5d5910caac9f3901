//! Order Models

use crate::domain::orders::records::OrderRecord;

/// Outcome of a status transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// The order moved to the requested status.
    Applied(OrderRecord),

    /// The order already had the requested status.
    Unchanged(OrderRecord),
}

impl StatusChange {
    #[must_use]
    pub fn order(&self) -> &OrderRecord {
        match self {
            Self::Applied(order) | Self::Unchanged(order) => order,
        }
    }
}
