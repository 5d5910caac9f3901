//! Variant inventory: stock counts and prices.

pub mod data;
pub mod errors;
pub mod models;
pub mod records;
pub mod repository;
mod service;

pub use errors::InventoryServiceError;
pub use service::*;
