//! Marketplace Domain Concerns

pub mod accounts;
pub mod carts;
pub mod favorites;
pub mod inventory;
pub mod orders;
pub mod products;
