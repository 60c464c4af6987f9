// SkillSwap - API Core
//
// Backend for the peer-feedback marketplace: communities, feedback requests,
// responses, evaluations and the credit ledger that ties them together.
// Architecture follows the domain layout in domains/*: models (SQL),
// activities (business logic), data (GraphQL types) and edges (resolvers).

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
