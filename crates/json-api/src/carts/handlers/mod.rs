//! Cart Handlers

pub(crate) mod add;
pub(crate) mod clear;
pub(crate) mod info;
pub(crate) mod items;
pub(crate) mod remove;
