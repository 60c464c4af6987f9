use crate::common::{CommunityId, DomainError};
use crate::domains::communities::models::{
    Community, CommunityMember, CommunityWithStats, Membership,
};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// Community with its member list
#[derive(Debug, Clone)]
pub struct CommunityDetails {
    pub community: Community,
    pub members: Vec<CommunityMember>,
    pub is_member: bool,
}

/// All communities, alphabetically, annotated for the viewer
pub async fn get_all_communities(
    viewer: &User,
    deps: &ServerDeps,
) -> Result<Vec<CommunityWithStats>, DomainError> {
    Ok(Community::find_all_with_stats(viewer.id, &deps.db_pool).await?)
}

pub async fn get_community_details(
    viewer: &User,
    community_id: CommunityId,
    deps: &ServerDeps,
) -> Result<CommunityDetails, DomainError> {
    let community = Community::find_by_id(community_id, &deps.db_pool)
        .await?
        .ok_or(DomainError::NotFound("Community"))?;

    let members = Membership::members_of(community.id, &deps.db_pool).await?;
    let is_member = members.iter().any(|m| m.user_id == viewer.id);

    Ok(CommunityDetails {
        community,
        members,
        is_member,
    })
}
