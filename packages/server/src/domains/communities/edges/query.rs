use juniper::FieldResult;
use tracing::debug;

use crate::common::{CommunityId, DomainError};
use crate::domains::communities::activities;
use crate::domains::communities::data::{CommunityData, CommunityDetailsData};
use crate::server::graphql::{parse_id, GraphQLContext};

/// All communities with member counts
pub async fn get_all_communities(ctx: &GraphQLContext) -> FieldResult<Vec<CommunityData>> {
    let user = ctx.current_user().await?;
    debug!(user_id = %user.id, "getAllCommunities");

    let communities = activities::get_all_communities(&user, ctx.deps())
        .await
        .map_err(DomainError::into_field_error)?;

    Ok(communities.into_iter().map(CommunityData::from).collect())
}

/// A single community with its members
pub async fn get_community_details(
    community_id: String,
    ctx: &GraphQLContext,
) -> FieldResult<CommunityDetailsData> {
    let user = ctx.current_user().await?;
    let community_id: CommunityId = parse_id(&community_id, "community")?;

    let details = activities::get_community_details(&user, community_id, ctx.deps())
        .await
        .map_err(DomainError::into_field_error)?;

    Ok(CommunityDetailsData::from(details))
}
