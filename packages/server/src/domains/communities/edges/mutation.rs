use juniper::FieldResult;

use crate::common::{CommunityId, DomainError};
use crate::domains::communities::activities;
use crate::domains::communities::data::MembershipResult;
use crate::server::graphql::{parse_id, GraphQLContext};

pub async fn join_community(
    community_id: String,
    ctx: &GraphQLContext,
) -> FieldResult<MembershipResult> {
    let user = ctx.current_user().await?;
    let community_id: CommunityId = parse_id(&community_id, "community")?;

    let (community, joined) = activities::join_community(&user, community_id, ctx.deps())
        .await
        .map_err(DomainError::into_field_error)?;

    Ok(MembershipResult {
        community_id: community.id.to_string(),
        is_member: true,
        changed: joined,
    })
}

pub async fn leave_community(
    community_id: String,
    ctx: &GraphQLContext,
) -> FieldResult<MembershipResult> {
    let user = ctx.current_user().await?;
    let community_id: CommunityId = parse_id(&community_id, "community")?;

    let left = activities::leave_community(&user, community_id, ctx.deps())
        .await
        .map_err(DomainError::into_field_error)?;

    Ok(MembershipResult {
        community_id: community_id.to_string(),
        is_member: false,
        changed: left,
    })
}
