use tracing::info;

use crate::common::{DomainError, FeedbackResponseId};
use crate::domains::feedback::ledger::UnitOfWork;
use crate::domains::feedback::lifecycle::{Rating, Transition};
use crate::domains::feedback::models::{FeedbackEvaluation, FeedbackRequest, FeedbackResponse};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone)]
pub struct SubmittedEvaluation {
    pub evaluation: FeedbackEvaluation,
    /// Bonus paid to the responder (0 for "okay")
    pub credits_awarded: i32,
}

/// Rate a response and complete its request.
pub async fn submit_evaluation(
    evaluator: &User,
    response_id: FeedbackResponseId,
    rating: i32,
    evaluation_text: Option<String>,
    deps: &ServerDeps,
) -> Result<SubmittedEvaluation, DomainError> {
    let rating = Rating::try_from(rating)?;
    let evaluation_text = evaluation_text
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());

    let mut uow = UnitOfWork::begin(&deps.db_pool).await?;

    let response = FeedbackResponse::find_by_id(response_id, uow.conn())
        .await?
        .ok_or(DomainError::NotFound("Feedback response"))?;

    let request = FeedbackRequest::find_for_update(response.request_id, uow.conn())
        .await?
        .ok_or(DomainError::NotFound("Feedback request"))?;

    if request.requester_id != evaluator.id {
        return Err(DomainError::not_authorized(
            "Only the requester can evaluate this feedback",
        ));
    }

    if FeedbackEvaluation::exists_for_response(response.id, uow.conn()).await? {
        return Err(DomainError::AlreadyEvaluated);
    }

    let next = request.status.apply(Transition::EvaluationSubmitted)?;

    let evaluation = FeedbackEvaluation::insert(
        response.id,
        evaluator.id,
        rating,
        evaluation_text.as_deref(),
        uow.conn(),
    )
    .await?;

    if !FeedbackRequest::transition_status(request.id, request.status, next, uow.conn()).await? {
        return Err(DomainError::invalid_state("Request can no longer be evaluated"));
    }

    let credits_awarded = rating.bonus();
    uow.credit(response.responder_id, credits_awarded).await?;

    uow.commit().await?;

    info!(
        request_id = %request.id,
        response_id = %response.id,
        rating = rating.value(),
        credits_awarded,
        "Feedback evaluated"
    );

    Ok(SubmittedEvaluation {
        evaluation,
        credits_awarded,
    })
}
