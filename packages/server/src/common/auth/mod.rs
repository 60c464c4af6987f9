/// Authentication errors shared by the GraphQL layer and domain activities.
///
/// Session verification itself lives in `domains::auth` (token decoding) and
/// `server::middleware::jwt_auth` (request extraction).
mod errors;

pub use errors::AuthError;
