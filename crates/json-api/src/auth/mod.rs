//! Session authentication and subject authorization

mod access;
pub(crate) mod middleware;

pub(crate) use access::authorize_subject;
