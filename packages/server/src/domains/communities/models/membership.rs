use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::common::{CommunityId, UserId};

/// Membership row (user × community)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Membership {
    pub user_id: UserId,
    pub community_id: CommunityId,
    pub joined_at: DateTime<Utc>,
}

/// A member as listed on a community page
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommunityMember {
    pub user_id: UserId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    /// Add a membership. Returns `false` if the user was already a member.
    pub async fn join<'e, E>(user_id: UserId, community_id: CommunityId, executor: E) -> Result<bool>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO user_communities (user_id, community_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, community_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(community_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Remove a membership. Returns `false` if there was nothing to remove.
    pub async fn leave(user_id: UserId, community_id: CommunityId, pool: &PgPool) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM user_communities WHERE user_id = $1 AND community_id = $2")
                .bind(user_id)
                .bind(community_id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Subset of `community_ids` the user is NOT a member of
    pub async fn find_non_member_communities<'e, E>(
        user_id: UserId,
        community_ids: &[CommunityId],
        executor: E,
    ) -> Result<Vec<CommunityId>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, CommunityId>(
            r#"
            SELECT requested.id
            FROM UNNEST($2::uuid[]) AS requested(id)
            WHERE NOT EXISTS (
                SELECT 1 FROM user_communities uc
                WHERE uc.user_id = $1 AND uc.community_id = requested.id
            )
            "#,
        )
        .bind(user_id)
        .bind(community_ids)
        .fetch_all(executor)
        .await
        .map_err(Into::into)
    }

    /// Whether the user belongs to at least one community the request targets
    pub async fn shares_request_community<'e, E>(
        user_id: UserId,
        request_id: crate::common::FeedbackRequestId,
        executor: E,
    ) -> Result<bool>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM feedback_request_communities frc
                JOIN user_communities uc ON uc.community_id = frc.community_id
                WHERE frc.request_id = $2 AND uc.user_id = $1
            )
            "#,
        )
        .bind(user_id)
        .bind(request_id)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Members of a community, earliest joiners first
    pub async fn members_of(community_id: CommunityId, pool: &PgPool) -> Result<Vec<CommunityMember>> {
        sqlx::query_as::<_, CommunityMember>(
            r#"
            SELECT u.id AS user_id, u.first_name, u.last_name, u.image_url, uc.joined_at
            FROM user_communities uc
            JOIN users u ON u.id = uc.user_id
            WHERE uc.community_id = $1
            ORDER BY uc.joined_at ASC
            "#,
        )
        .bind(community_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
