// HTTP routes
pub mod graphql;
pub mod health;
pub mod webhooks;

pub use graphql::*;
pub use health::*;
pub use webhooks::*;
