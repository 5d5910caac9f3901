//! Authentication

mod errors;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use repository::{MemorySessionsRepository, MockSessionsRepository, SessionsRepository};
pub use service::*;
pub use token::*;
