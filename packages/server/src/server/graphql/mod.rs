// GraphQL schema and context
pub mod args;
pub mod context;
pub mod schema;

pub use args::*;
pub use context::*;
pub use schema::*;
