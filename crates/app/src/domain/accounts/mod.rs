//! Accounts, roles and purchase eligibility

pub mod data;
pub mod errors;
pub mod models;
pub mod records;
pub mod repository;
pub mod service;

pub use errors::AccountsServiceError;
pub use service::*;
