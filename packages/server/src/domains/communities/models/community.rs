use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::common::{CommunityId, UserId};

/// Community model - static reference data
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Community {
    pub id: CommunityId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Community row joined with membership statistics for one viewer
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommunityWithStats {
    pub id: CommunityId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub member_count: i64,
    pub is_member: bool,
}

impl Community {
    pub async fn find_by_id(id: CommunityId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM communities WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// All communities ordered by name, with member counts and the viewer's membership flag
    pub async fn find_all_with_stats(viewer: UserId, pool: &PgPool) -> Result<Vec<CommunityWithStats>> {
        sqlx::query_as::<_, CommunityWithStats>(
            r#"
            SELECT c.id, c.name, c.description, c.created_at,
                   COUNT(uc.user_id) AS member_count,
                   COALESCE(BOOL_OR(uc.user_id = $1), FALSE) AS is_member
            FROM communities c
            LEFT JOIN user_communities uc ON uc.community_id = c.id
            GROUP BY c.id
            ORDER BY c.name ASC
            "#,
        )
        .bind(viewer)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Return the subset of `ids` that do not exist
    pub async fn find_missing<'e, E>(ids: &[CommunityId], executor: E) -> Result<Vec<CommunityId>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, CommunityId>(
            r#"
            SELECT requested.id
            FROM UNNEST($1::uuid[]) AS requested(id)
            WHERE NOT EXISTS (SELECT 1 FROM communities c WHERE c.id = requested.id)
            "#,
        )
        .bind(ids)
        .fetch_all(executor)
        .await
        .map_err(Into::into)
    }

    /// Insert a community, returning the existing row when the name is taken
    pub async fn find_or_create(name: &str, description: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO communities (id, name, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING *
            "#,
        )
        .bind(CommunityId::new())
        .bind(name)
        .bind(description)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
