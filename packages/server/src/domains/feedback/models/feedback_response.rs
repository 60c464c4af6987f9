use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgExecutor};

use crate::common::{FeedbackRequestId, FeedbackResponseId, UserId};

/// FeedbackResponse model - one responder's feedback on a request
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FeedbackResponse {
    pub id: FeedbackResponseId,
    pub request_id: FeedbackRequestId,
    pub responder_id: UserId,
    pub feedback_text: String,
    pub created_at: DateTime<Utc>,
}

impl FeedbackResponse {
    pub async fn find_by_id<'e, E>(id: FeedbackResponseId, executor: E) -> Result<Option<Self>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Self>("SELECT * FROM feedback_responses WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }

    pub async fn insert(
        request_id: FeedbackRequestId,
        responder_id: UserId,
        feedback_text: &str,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO feedback_responses (id, request_id, responder_id, feedback_text)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(FeedbackResponseId::new())
        .bind(request_id)
        .bind(responder_id)
        .bind(feedback_text)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }
}
