//! Favorites

pub mod errors;
mod service;

pub use errors::FavoritesServiceError;
pub use service::*;
