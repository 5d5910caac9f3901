//! Variant Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod name_exists;
pub(crate) mod price;
pub(crate) mod stock;
