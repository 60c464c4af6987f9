use tracing::info;

use crate::common::{CommunityId, DomainError};
use crate::domains::communities::{Community, Membership};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// Join the selected communities and flip the onboarding flag.
///
/// Either every membership is written and the flag is set, or nothing is.
/// Calling it again adds any new communities and leaves existing ones alone.
pub async fn complete_onboarding(
    user: &User,
    community_ids: Vec<CommunityId>,
    deps: &ServerDeps,
) -> Result<User, DomainError> {
    let mut community_ids = community_ids;
    community_ids.sort();
    community_ids.dedup();

    if community_ids.is_empty() {
        return Err(DomainError::validation(
            "Select at least one community to finish onboarding",
        ));
    }

    let mut tx = deps.db_pool.begin().await?;

    let missing = Community::find_missing(&community_ids, &mut *tx).await?;
    if !missing.is_empty() {
        return Err(DomainError::NotFound("Community"));
    }

    for community_id in &community_ids {
        Membership::join(user.id, *community_id, &mut *tx).await?;
    }

    let updated = User::mark_onboarded(user.id, &mut *tx).await?;

    tx.commit().await?;

    info!(
        user_id = %user.id,
        communities = community_ids.len(),
        "User completed onboarding"
    );

    Ok(updated)
}
