//! Auth domain - verifies identity provider session tokens
//!
//! Sign-up and sign-in happen at the external identity provider. The API only
//! decodes the session JWT it forwards; local user rows are provisioned by the
//! identity webhook (see `domains::identity`).

pub mod jwt;

pub use jwt::{Claims, JwtService};
