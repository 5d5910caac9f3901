//! Payment Handlers

pub(crate) mod callback;
pub(crate) mod create;
pub(crate) mod refund;
pub(crate) mod status;
