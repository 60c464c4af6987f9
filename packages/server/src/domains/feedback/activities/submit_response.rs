use tracing::{info, warn};

use crate::common::{DomainError, FeedbackRequestId};
use crate::domains::communities::Membership;
use crate::domains::feedback::ledger::UnitOfWork;
use crate::domains::feedback::lifecycle::{validate_feedback_text, Transition};
use crate::domains::feedback::models::{FeedbackRequest, FeedbackResponse};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone)]
pub struct SubmittedResponse {
    pub response: FeedbackResponse,
    pub credits_earned: i32,
}

/// Answer a pending request. The responder is paid the request's cost.
///
/// The request row stays locked until commit, so of two concurrent first
/// responses the second observes `in_progress` and is rejected.
pub async fn submit_response(
    responder: &User,
    request_id: FeedbackRequestId,
    feedback_text: &str,
    deps: &ServerDeps,
) -> Result<SubmittedResponse, DomainError> {
    let feedback_text = validate_feedback_text(feedback_text)?;

    let mut uow = UnitOfWork::begin(&deps.db_pool).await?;

    let request = FeedbackRequest::find_for_update(request_id, uow.conn())
        .await?
        .ok_or(DomainError::NotFound("Feedback request"))?;

    if request.requester_id == responder.id {
        return Err(DomainError::SelfFeedback);
    }

    let next = request.status.apply(Transition::ResponseAccepted)?;

    if !Membership::shares_request_community(responder.id, request.id, uow.conn()).await? {
        return Err(DomainError::not_authorized(
            "You must belong to one of the request's communities to respond",
        ));
    }

    let response =
        FeedbackResponse::insert(request.id, responder.id, feedback_text, uow.conn()).await?;

    if !FeedbackRequest::transition_status(request.id, request.status, next, uow.conn()).await? {
        warn!(request_id = %request.id, "Request status changed under lock");
        return Err(DomainError::invalid_state(
            "Request is no longer accepting feedback",
        ));
    }

    let credits_earned = request.request_type.cost();
    uow.credit(responder.id, credits_earned).await?;

    uow.commit().await?;

    info!(
        request_id = %request.id,
        response_id = %response.id,
        responder_id = %responder.id,
        credits_earned,
        "Feedback response submitted"
    );

    Ok(SubmittedResponse {
        response,
        credits_earned,
    })
}
