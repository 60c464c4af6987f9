//! Feedback activities - business logic functions
//!
//! Mutations run inside a [`UnitOfWork`](crate::domains::feedback::ledger::UnitOfWork);
//! queries read straight from the pool.

mod create_request;
mod queries;
mod submit_evaluation;
mod submit_response;

pub use create_request::{create_request, CreateRequest, CreatedRequest};
pub use queries::{
    get_available_requests, get_my_requests, get_request_by_id, MyRequest, RequestDetail,
    RequestViewerRole,
};
pub use submit_evaluation::{submit_evaluation, SubmittedEvaluation};
pub use submit_response::{submit_response, SubmittedResponse};
