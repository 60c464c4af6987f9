use thiserror::Error;

/// Authentication errors for the SkillSwap API
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    /// The session is valid but the identity webhook has not provisioned a
    /// local user for it yet.
    #[error("User not found in database")]
    UserNotProvisioned,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}
