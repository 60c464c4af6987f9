//! Argument parsing shared by resolvers

use juniper::FieldResult;

use crate::common::{DomainError, Id};

/// Parse a GraphQL id argument into a typed id.
///
/// Malformed ids are a validation error, not a not-found.
pub fn parse_id<T>(raw: &str, what: &str) -> FieldResult<Id<T>> {
    Id::parse(raw.trim()).map_err(|_| {
        DomainError::validation(format!("Invalid {what} id: {raw}")).into_field_error()
    })
}
