//! Marketplace application domain, storage contracts and services.

pub mod auth;
pub mod context;
pub mod domain;
pub mod payments;
pub mod store;

#[cfg(test)]
mod test;

mod uuids;
