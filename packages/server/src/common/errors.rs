//! Domain error taxonomy.
//!
//! Every activity reports failures through [`DomainError`]. The GraphQL layer
//! turns them into field errors carrying a stable `code` extension so
//! clients can branch without parsing messages.

use juniper::{FieldError, Object, Value};
use thiserror::Error;
use tracing::error;

use super::auth::AuthError;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("You cannot give feedback on your own request")]
    SelfFeedback,

    #[error("This feedback has already been evaluated")]
    AlreadyEvaluated,

    #[error("Insufficient credits: {required} required, {available} available")]
    InsufficientCredits { required: i32, available: i32 },

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_authorized(message: impl Into<String>) -> Self {
        Self::NotAuthorized(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Stable machine-readable code exposed in GraphQL error extensions
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::NotFound(_) => "NOT_FOUND",
            DomainError::NotAuthorized(_) => "NOT_AUTHORIZED",
            DomainError::InvalidState(_) => "INVALID_STATE",
            DomainError::SelfFeedback => "SELF_FEEDBACK",
            DomainError::AlreadyEvaluated => "ALREADY_EVALUATED",
            DomainError::InsufficientCredits { .. } => "INSUFFICIENT_CREDITS",
            DomainError::Validation(_) => "VALIDATION",
            DomainError::Auth(AuthError::UserNotProvisioned) => "NOT_FOUND",
            DomainError::Auth(AuthError::DatabaseError(_)) => "INTERNAL",
            DomainError::Auth(_) => "UNAUTHENTICATED",
            DomainError::Database(_) | DomainError::Internal(_) => "INTERNAL",
        }
    }

    /// Convert into a GraphQL field error.
    ///
    /// Infrastructure failures are logged here and replaced by a generic
    /// message; everything else is shown to the caller verbatim.
    pub fn into_field_error(self) -> FieldError {
        let code = self.code();
        let message = if code == "INTERNAL" {
            error!(error = %self, "Request failed with internal error");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let mut extensions = Object::with_capacity(1);
        extensions.add_field("code", Value::scalar(code.to_string()));
        FieldError::new(message, Value::Object(extensions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(DomainError::NotFound("Request").code(), "NOT_FOUND");
        assert_eq!(DomainError::SelfFeedback.code(), "SELF_FEEDBACK");
        assert_eq!(DomainError::AlreadyEvaluated.code(), "ALREADY_EVALUATED");
        assert_eq!(
            DomainError::InsufficientCredits {
                required: 3,
                available: 1
            }
            .code(),
            "INSUFFICIENT_CREDITS"
        );
        assert_eq!(
            DomainError::from(AuthError::AuthenticationRequired).code(),
            "UNAUTHENTICATED"
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(DomainError::NotFound("Community").to_string(), "Community not found");
        assert_eq!(
            DomainError::InsufficientCredits {
                required: 5,
                available: 2
            }
            .to_string(),
            "Insufficient credits: 5 required, 2 available"
        );
        assert_eq!(
            DomainError::from(AuthError::AuthenticationRequired).to_string(),
            "Authentication required"
        );
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let err = DomainError::Internal(anyhow::anyhow!("connection reset by peer"));
        let field_error = err.into_field_error();
        assert_eq!(field_error.message(), "Internal server error");
    }
}
