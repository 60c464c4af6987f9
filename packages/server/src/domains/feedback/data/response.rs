use chrono::{DateTime, Utc};
use juniper::GraphQLObject;

use crate::domains::feedback::activities::{SubmittedEvaluation, SubmittedResponse};
use crate::domains::feedback::models::{FeedbackEvaluation, ResponseDetailRow};
use crate::domains::users::UserSummaryData;

#[derive(Debug, Clone, GraphQLObject)]
pub struct FeedbackEvaluationData {
    pub id: String,
    pub response_id: String,
    pub rating: i32,
    pub evaluation_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<FeedbackEvaluation> for FeedbackEvaluationData {
    fn from(evaluation: FeedbackEvaluation) -> Self {
        Self {
            id: evaluation.id.to_string(),
            response_id: evaluation.response_id.to_string(),
            rating: i32::from(evaluation.rating),
            evaluation_text: evaluation.evaluation_text,
            created_at: evaluation.created_at,
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct FeedbackResponseData {
    pub id: String,
    pub request_id: String,
    pub responder: UserSummaryData,
    pub feedback_text: String,
    pub created_at: DateTime<Utc>,
    pub evaluation: Option<FeedbackEvaluationData>,
}

impl From<ResponseDetailRow> for FeedbackResponseData {
    fn from(row: ResponseDetailRow) -> Self {
        let response_id = row.response.id.to_string();
        let evaluation = match (row.evaluation_id, row.rating, row.evaluated_at) {
            (Some(id), Some(rating), Some(created_at)) => Some(FeedbackEvaluationData {
                id: id.to_string(),
                response_id: response_id.clone(),
                rating: i32::from(rating),
                evaluation_text: row.evaluation_text,
                created_at,
            }),
            _ => None,
        };

        Self {
            id: response_id,
            request_id: row.response.request_id.to_string(),
            responder: UserSummaryData::new(
                row.response.responder_id,
                row.responder_first_name.as_deref(),
                row.responder_last_name.as_deref(),
                row.responder_image_url,
            ),
            feedback_text: row.response.feedback_text,
            created_at: row.response.created_at,
            evaluation,
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct SubmitResponseResult {
    pub response_id: String,
    pub request_id: String,
    pub feedback_text: String,
    pub created_at: DateTime<Utc>,
    /// Credits paid to the responder for this response
    pub credits_earned: i32,
}

impl From<SubmittedResponse> for SubmitResponseResult {
    fn from(submitted: SubmittedResponse) -> Self {
        Self {
            response_id: submitted.response.id.to_string(),
            request_id: submitted.response.request_id.to_string(),
            feedback_text: submitted.response.feedback_text,
            created_at: submitted.response.created_at,
            credits_earned: submitted.credits_earned,
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct SubmitEvaluationResult {
    pub evaluation: FeedbackEvaluationData,
    /// Bonus credits paid to the responder
    pub credits_awarded: i32,
}

impl From<SubmittedEvaluation> for SubmitEvaluationResult {
    fn from(submitted: SubmittedEvaluation) -> Self {
        Self {
            evaluation: FeedbackEvaluationData::from(submitted.evaluation),
            credits_awarded: submitted.credits_awarded,
        }
    }
}
