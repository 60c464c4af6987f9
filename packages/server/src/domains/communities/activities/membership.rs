//! Join / leave a community

use tracing::info;

use crate::common::{CommunityId, DomainError};
use crate::domains::communities::models::{Community, Membership};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// Join a community. Joining twice is a no-op.
///
/// Returns the community and whether a new membership was created.
pub async fn join_community(
    user: &User,
    community_id: CommunityId,
    deps: &ServerDeps,
) -> Result<(Community, bool), DomainError> {
    let community = Community::find_by_id(community_id, &deps.db_pool)
        .await?
        .ok_or(DomainError::NotFound("Community"))?;

    let joined = Membership::join(user.id, community.id, &deps.db_pool).await?;

    if joined {
        info!(user_id = %user.id, community_id = %community.id, "User joined community");
    }

    Ok((community, joined))
}

/// Leave a community.
///
/// Returns `false` when the user was not a member. Requests already targeted
/// at the community keep their targeting.
pub async fn leave_community(
    user: &User,
    community_id: CommunityId,
    deps: &ServerDeps,
) -> Result<bool, DomainError> {
    let left = Membership::leave(user.id, community_id, &deps.db_pool).await?;

    if left {
        info!(user_id = %user.id, community_id = %community_id, "User left community");
    }

    Ok(left)
}
