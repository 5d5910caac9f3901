//! Carts

pub mod errors;
pub mod models;
mod service;

pub use errors::CartsServiceError;
pub use service::*;
