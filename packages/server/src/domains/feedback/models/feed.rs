//! Read models for the request feeds and the request detail page

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::{CommunityId, FeedbackEvaluationId, FeedbackRequestId, UserId};
use crate::domains::feedback::lifecycle::RequestType;
use crate::domains::feedback::models::{FeedbackRequest, FeedbackResponse};

/// A request on the requester's own dashboard
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MyRequestRow {
    #[sqlx(flatten)]
    pub request: FeedbackRequest,
    pub response_count: i64,
}

/// A request offered to a potential responder
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AvailableRequestRow {
    #[sqlx(flatten)]
    pub request: FeedbackRequest,
    pub requester_first_name: Option<String>,
    pub requester_last_name: Option<String>,
    pub requester_image_url: Option<String>,
    /// First target community (by name) the viewer belongs to
    pub community_id: CommunityId,
    pub community_name: String,
    pub has_responded: bool,
}

/// Filters for the available-requests feed
#[derive(Debug, Clone, Default)]
pub struct AvailableRequestFilter {
    pub community_id: Option<CommunityId>,
    pub request_type: Option<RequestType>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RequestCommunityRow {
    pub request_id: FeedbackRequestId,
    pub community_id: CommunityId,
    pub name: String,
}

/// A response with its author and, once rated, its evaluation
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResponseDetailRow {
    #[sqlx(flatten)]
    pub response: FeedbackResponse,
    pub responder_first_name: Option<String>,
    pub responder_last_name: Option<String>,
    pub responder_image_url: Option<String>,
    pub evaluation_id: Option<FeedbackEvaluationId>,
    pub rating: Option<i16>,
    pub evaluation_text: Option<String>,
    pub evaluated_at: Option<DateTime<Utc>>,
}

impl MyRequestRow {
    /// Requests created by `requester_id`, newest first
    pub async fn find_for_requester(requester_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT fr.*, COUNT(r.id) AS response_count
            FROM feedback_requests fr
            LEFT JOIN feedback_responses r ON r.request_id = fr.id
            WHERE fr.requester_id = $1
            GROUP BY fr.id
            ORDER BY fr.created_at DESC, fr.id DESC
            "#,
        )
        .bind(requester_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

impl AvailableRequestRow {
    /// Requests `viewer_id` can answer, plus ones they already answered.
    ///
    /// Pending requests come first, then oldest first.
    pub async fn find_for_viewer(
        viewer_id: UserId,
        filter: &AvailableRequestFilter,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT fr.*,
                   u.first_name AS requester_first_name,
                   u.last_name AS requester_last_name,
                   u.image_url AS requester_image_url,
                   vc.id AS community_id,
                   vc.name AS community_name,
                   EXISTS (
                       SELECT 1 FROM feedback_responses r
                       WHERE r.request_id = fr.id AND r.responder_id = $1
                   ) AS has_responded
            FROM feedback_requests fr
            JOIN users u ON u.id = fr.requester_id
            JOIN LATERAL (
                SELECT c.id, c.name
                FROM feedback_request_communities frc
                JOIN user_communities uc
                  ON uc.community_id = frc.community_id AND uc.user_id = $1
                JOIN communities c ON c.id = frc.community_id
                WHERE frc.request_id = fr.id
                  AND ($2::uuid IS NULL OR frc.community_id = $2)
                ORDER BY c.name ASC
                LIMIT 1
            ) vc ON TRUE
            WHERE fr.requester_id <> $1
              AND ($3::feedback_request_type IS NULL OR fr.request_type = $3)
              AND (
                  fr.status = 'pending'
                  OR EXISTS (
                      SELECT 1 FROM feedback_responses r
                      WHERE r.request_id = fr.id AND r.responder_id = $1
                  )
              )
            ORDER BY (fr.status <> 'pending') ASC, fr.created_at ASC, fr.id ASC
            "#,
        )
        .bind(viewer_id)
        .bind(filter.community_id)
        .bind(filter.request_type)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

impl RequestCommunityRow {
    /// Target communities of the given requests, by name
    pub async fn find_for_requests(
        request_ids: &[FeedbackRequestId],
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT frc.request_id, c.id AS community_id, c.name
            FROM feedback_request_communities frc
            JOIN communities c ON c.id = frc.community_id
            WHERE frc.request_id = ANY($1)
            ORDER BY c.name ASC
            "#,
        )
        .bind(request_ids)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

impl ResponseDetailRow {
    /// All responses to a request, oldest first
    pub async fn find_for_request(request_id: FeedbackRequestId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT r.*,
                   u.first_name AS responder_first_name,
                   u.last_name AS responder_last_name,
                   u.image_url AS responder_image_url,
                   e.id AS evaluation_id,
                   e.rating,
                   e.evaluation_text,
                   e.created_at AS evaluated_at
            FROM feedback_responses r
            JOIN users u ON u.id = r.responder_id
            LEFT JOIN feedback_evaluations e ON e.response_id = r.id
            WHERE r.request_id = $1
            ORDER BY r.created_at ASC
            "#,
        )
        .bind(request_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
