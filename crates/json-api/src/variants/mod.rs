//! Variants: per-product stock and pricing

mod errors;
mod handlers;
mod models;

pub(crate) use handlers::*;
