use juniper::FieldResult;

use crate::common::{CommunityId, DomainError};
use crate::domains::users::activities;
use crate::domains::users::data::{UpdateProfileInput, UserData};
use crate::server::graphql::{parse_id, GraphQLContext};

pub async fn complete_onboarding(
    community_ids: Vec<String>,
    ctx: &GraphQLContext,
) -> FieldResult<UserData> {
    let user = ctx.current_user().await?;

    let community_ids = community_ids
        .iter()
        .map(|raw| parse_id(raw, "community"))
        .collect::<FieldResult<Vec<CommunityId>>>()?;

    let updated = activities::complete_onboarding(&user, community_ids, ctx.deps())
        .await
        .map_err(DomainError::into_field_error)?;

    Ok(UserData::from(updated))
}

pub async fn update_profile(
    input: UpdateProfileInput,
    ctx: &GraphQLContext,
) -> FieldResult<UserData> {
    let user = ctx.current_user().await?;

    let updated = activities::update_profile(&user, input.into(), ctx.deps())
        .await
        .map_err(DomainError::into_field_error)?;

    Ok(UserData::from(updated))
}
