use juniper::FieldResult;

use crate::common::{CommunityId, DomainError, FeedbackRequestId};
use crate::domains::feedback::activities;
use crate::domains::feedback::data::{
    AvailableRequestData, MyRequestData, RequestDetailData, RequestTypeData,
};
use crate::domains::feedback::models::AvailableRequestFilter;
use crate::server::graphql::{parse_id, GraphQLContext};

pub async fn get_my_requests(ctx: &GraphQLContext) -> FieldResult<Vec<MyRequestData>> {
    let user = ctx.current_user().await?;

    let requests = activities::get_my_requests(&user, ctx.deps())
        .await
        .map_err(DomainError::into_field_error)?;

    Ok(requests.into_iter().map(MyRequestData::from).collect())
}

pub async fn get_available_requests(
    community_id: Option<String>,
    request_type: Option<RequestTypeData>,
    ctx: &GraphQLContext,
) -> FieldResult<Vec<AvailableRequestData>> {
    let user = ctx.current_user().await?;

    let community_id: Option<CommunityId> = community_id
        .map(|raw| parse_id(&raw, "community"))
        .transpose()?;

    let filter = AvailableRequestFilter {
        community_id,
        request_type: request_type.map(Into::into),
    };

    let requests = activities::get_available_requests(&user, filter, ctx.deps())
        .await
        .map_err(DomainError::into_field_error)?;

    Ok(requests.into_iter().map(AvailableRequestData::from).collect())
}

pub async fn get_request_by_id(
    request_id: String,
    ctx: &GraphQLContext,
) -> FieldResult<RequestDetailData> {
    let user = ctx.current_user().await?;
    let request_id: FeedbackRequestId = parse_id(&request_id, "request")?;

    let detail = activities::get_request_by_id(&user, request_id, ctx.deps())
        .await
        .map_err(DomainError::into_field_error)?;

    Ok(RequestDetailData::from(detail))
}
