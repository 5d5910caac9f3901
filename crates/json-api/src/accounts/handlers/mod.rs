//! Account Handlers

pub(crate) mod create;
pub(crate) mod customer_mode;
pub(crate) mod eligibility;
pub(crate) mod logout;
pub(crate) mod role;
