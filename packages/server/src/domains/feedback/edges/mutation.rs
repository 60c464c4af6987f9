use juniper::FieldResult;

use crate::common::{CommunityId, DomainError, FeedbackRequestId, FeedbackResponseId};
use crate::domains::feedback::activities::{self, CreateRequest};
use crate::domains::feedback::data::{
    CreateRequestInput, CreateRequestResult, SubmitEvaluationInput, SubmitEvaluationResult,
    SubmitResponseInput, SubmitResponseResult,
};
use crate::server::graphql::{parse_id, GraphQLContext};

pub async fn create_request(
    input: CreateRequestInput,
    ctx: &GraphQLContext,
) -> FieldResult<CreateRequestResult> {
    let user = ctx.current_user().await?;

    let community_ids = input
        .community_ids
        .iter()
        .map(|raw| parse_id(raw, "community"))
        .collect::<FieldResult<Vec<CommunityId>>>()?;

    let created = activities::create_request(
        &user,
        CreateRequest {
            request_type: input.request_type.into(),
            content_url: input.content_url,
            content_text: input.content_text,
            context: input.context.unwrap_or_default(),
            community_ids,
        },
        ctx.deps(),
    )
    .await
    .map_err(DomainError::into_field_error)?;

    Ok(CreateRequestResult::from(created))
}

pub async fn submit_response(
    input: SubmitResponseInput,
    ctx: &GraphQLContext,
) -> FieldResult<SubmitResponseResult> {
    let user = ctx.current_user().await?;
    let request_id: FeedbackRequestId = parse_id(&input.request_id, "request")?;

    let submitted = activities::submit_response(&user, request_id, &input.feedback_text, ctx.deps())
        .await
        .map_err(DomainError::into_field_error)?;

    Ok(SubmitResponseResult::from(submitted))
}

pub async fn submit_evaluation(
    input: SubmitEvaluationInput,
    ctx: &GraphQLContext,
) -> FieldResult<SubmitEvaluationResult> {
    let user = ctx.current_user().await?;
    let response_id: FeedbackResponseId = parse_id(&input.response_id, "response")?;

    let submitted = activities::submit_evaluation(
        &user,
        response_id,
        input.rating,
        input.evaluation_text,
        ctx.deps(),
    )
    .await
    .map_err(DomainError::into_field_error)?;

    Ok(SubmitEvaluationResult::from(submitted))
}
