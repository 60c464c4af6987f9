//! Request lifecycle and credit rules.
//!
//! Everything here is pure: no I/O, no clock. Activities consult these rules
//! before they write anything.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::DomainError;

/// Minimum length (after trimming) of a response's feedback text
pub const MIN_FEEDBACK_LENGTH: usize = 10;

/// What kind of artifact the requester wants reviewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "feedback_request_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    Linkedin,
    Email,
    Resume,
    Portfolio,
    Coverletter,
}

impl RequestType {
    /// Credits debited from the requester, and paid to the responder
    pub fn cost(&self) -> i32 {
        match self {
            RequestType::Linkedin => 1,
            RequestType::Email => 2,
            RequestType::Resume => 3,
            RequestType::Portfolio => 4,
            RequestType::Coverletter => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Linkedin => "linkedin",
            RequestType::Email => "email",
            RequestType::Resume => "resume",
            RequestType::Portfolio => "portfolio",
            RequestType::Coverletter => "coverletter",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "feedback_request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// Events that move a request forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A community member submitted feedback
    ResponseAccepted,
    /// The requester rated the feedback
    EvaluationSubmitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot apply {transition:?} to a request that is {from}")]
pub struct InvalidTransition {
    pub from: RequestStatus,
    pub transition: Transition,
}

impl From<InvalidTransition> for DomainError {
    fn from(err: InvalidTransition) -> Self {
        let message = match err.transition {
            Transition::ResponseAccepted => format!(
                "Request is {} and no longer accepts feedback",
                err.from
            ),
            Transition::EvaluationSubmitted => format!(
                "Request is {} and cannot be evaluated",
                err.from
            ),
        };
        DomainError::InvalidState(message)
    }
}

impl RequestStatus {
    /// The status after `transition`, or an error when it does not apply.
    ///
    /// Completed is terminal.
    pub fn apply(self, transition: Transition) -> Result<RequestStatus, InvalidTransition> {
        match (self, transition) {
            (RequestStatus::Pending, Transition::ResponseAccepted) => Ok(RequestStatus::InProgress),
            (RequestStatus::InProgress, Transition::EvaluationSubmitted) => {
                Ok(RequestStatus::Completed)
            }
            (from, transition) => Err(InvalidTransition { from, transition }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requester's rating of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Okay,
    Helpful,
    SuperInsightful,
}

impl Rating {
    /// Extra credits paid to the responder on top of the response reward
    pub fn bonus(&self) -> i32 {
        match self {
            Rating::Okay => 0,
            Rating::Helpful => 1,
            Rating::SuperInsightful => 2,
        }
    }

    pub fn value(&self) -> i16 {
        match self {
            Rating::Okay => 3,
            Rating::Helpful => 4,
            Rating::SuperInsightful => 5,
        }
    }
}

impl TryFrom<i32> for Rating {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(Rating::Okay),
            4 => Ok(Rating::Helpful),
            5 => Ok(Rating::SuperInsightful),
            other => Err(DomainError::validation(format!(
                "Rating must be 3, 4 or 5 (got {other})"
            ))),
        }
    }
}

/// Trimmed feedback text, or a validation error when it is too short
pub fn validate_feedback_text(text: &str) -> Result<&str, DomainError> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_FEEDBACK_LENGTH {
        return Err(DomainError::validation(format!(
            "Feedback must be at least {MIN_FEEDBACK_LENGTH} characters"
        )));
    }
    Ok(trimmed)
}
