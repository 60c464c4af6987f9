//! Feedback domain - requests, responses, evaluations and the credit economy
//!
//! A request is broadcast to one or more communities, answered by exactly one
//! member of those communities and then rated by its requester. Every step
//! moves credits through [`ledger::UnitOfWork`] in the same transaction as the
//! status change it pays for.

pub mod activities;
pub mod data;
pub mod edges;
pub mod ledger;
pub mod lifecycle;
pub mod models;

pub use lifecycle::{Rating, RequestStatus, RequestType, Transition, MIN_FEEDBACK_LENGTH};
pub use models::{FeedbackEvaluation, FeedbackRequest, FeedbackResponse};
