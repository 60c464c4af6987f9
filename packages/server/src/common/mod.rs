// Common types and utilities shared across the application

pub mod auth;
pub mod entity_ids;
pub mod errors;
pub mod id;

pub use auth::AuthError;
pub use entity_ids::*;
pub use errors::DomainError;
pub use id::Id;
