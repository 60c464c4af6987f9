use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgExecutor};
use typed_builder::TypedBuilder;

use crate::common::{CommunityId, FeedbackRequestId, UserId};
use crate::domains::feedback::lifecycle::{RequestStatus, RequestType};

/// FeedbackRequest model - SQL persistence layer
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FeedbackRequest {
    pub id: FeedbackRequestId,
    pub requester_id: UserId,
    pub request_type: RequestType,
    pub content_url: Option<String>,
    pub content_text: Option<String>,
    pub context: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct NewFeedbackRequest {
    pub requester_id: UserId,
    pub request_type: RequestType,
    #[builder(default)]
    pub content_url: Option<String>,
    #[builder(default)]
    pub content_text: Option<String>,
    #[builder(default, setter(into))]
    pub context: String,
}

impl FeedbackRequest {
    pub async fn find_by_id<'e, E>(id: FeedbackRequestId, executor: E) -> Result<Option<Self>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Self>("SELECT * FROM feedback_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }

    /// Load and row-lock a request for the rest of the transaction
    pub async fn find_for_update(id: FeedbackRequestId, conn: &mut PgConnection) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM feedback_requests WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(Into::into)
    }

    pub async fn insert(new: &NewFeedbackRequest, conn: &mut PgConnection) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO feedback_requests
                (id, requester_id, request_type, content_url, content_text, context, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')
            RETURNING *
            "#,
        )
        .bind(FeedbackRequestId::new())
        .bind(new.requester_id)
        .bind(new.request_type)
        .bind(&new.content_url)
        .bind(&new.content_text)
        .bind(&new.context)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    /// Write the target community join rows for a request
    pub async fn attach_communities(
        id: FeedbackRequestId,
        community_ids: &[CommunityId],
        conn: &mut PgConnection,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO feedback_request_communities (request_id, community_id)
            SELECT $1, UNNEST($2::uuid[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(id)
        .bind(community_ids)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Compare-and-swap the status. Returns `false` if the row was not in `from`.
    pub async fn transition_status(
        id: FeedbackRequestId,
        from: RequestStatus,
        to: RequestStatus,
        conn: &mut PgConnection,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE feedback_requests
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_builder() {
        let new = NewFeedbackRequest::builder()
            .requester_id(UserId::new())
            .request_type(RequestType::Resume)
            .content_url(Some("https://example.com/cv.pdf".to_string()))
            .build();

        assert_eq!(new.context, "");
        assert!(new.content_text.is_none());
    }
}
