use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::common::{FeedbackEvaluationId, FeedbackResponseId, UserId};
use crate::domains::feedback::lifecycle::Rating;

/// FeedbackEvaluation model - the requester's rating of a response
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FeedbackEvaluation {
    pub id: FeedbackEvaluationId,
    pub response_id: FeedbackResponseId,
    pub evaluator_id: UserId,
    pub rating: i16,
    pub evaluation_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FeedbackEvaluation {
    pub async fn exists_for_response(response_id: FeedbackResponseId, conn: &mut PgConnection) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM feedback_evaluations WHERE response_id = $1)",
        )
        .bind(response_id)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn insert(
        response_id: FeedbackResponseId,
        evaluator_id: UserId,
        rating: Rating,
        evaluation_text: Option<&str>,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO feedback_evaluations (id, response_id, evaluator_id, rating, evaluation_text)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(FeedbackEvaluationId::new())
        .bind(response_id)
        .bind(evaluator_id)
        .bind(rating.value())
        .bind(evaluation_text)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }
}
