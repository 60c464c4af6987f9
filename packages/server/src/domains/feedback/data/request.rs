use chrono::{DateTime, Utc};
use juniper::GraphQLObject;

use super::{FeedbackResponseData, RequestStatusData, RequestTypeData};
use crate::domains::communities::data::CommunityRefData;
use crate::domains::feedback::activities::{
    CreatedRequest, MyRequest, RequestDetail, RequestViewerRole,
};
use crate::domains::feedback::models::{AvailableRequestRow, RequestCommunityRow};
use crate::domains::users::UserSummaryData;

impl From<&RequestCommunityRow> for CommunityRefData {
    fn from(row: &RequestCommunityRow) -> Self {
        Self {
            id: row.community_id.to_string(),
            name: row.name.clone(),
        }
    }
}

/// A request as shown on the requester's dashboard
#[derive(Debug, Clone, GraphQLObject)]
pub struct MyRequestData {
    pub id: String,
    pub request_type: RequestTypeData,
    pub status: RequestStatusData,
    pub content_url: Option<String>,
    pub content_text: Option<String>,
    pub context: String,
    pub cost: i32,
    pub feedback_count: i32,
    pub communities: Vec<CommunityRefData>,
    pub created_at: DateTime<Utc>,
}

impl From<MyRequest> for MyRequestData {
    fn from(item: MyRequest) -> Self {
        let request = item.row.request;
        Self {
            id: request.id.to_string(),
            request_type: request.request_type.into(),
            status: request.status.into(),
            cost: request.request_type.cost(),
            content_url: request.content_url,
            content_text: request.content_text,
            context: request.context,
            feedback_count: item.row.response_count as i32,
            communities: item.communities.iter().map(CommunityRefData::from).collect(),
            created_at: request.created_at,
        }
    }
}

/// A request offered in the "give feedback" feed
#[derive(Debug, Clone, GraphQLObject)]
pub struct AvailableRequestData {
    pub id: String,
    pub request_type: RequestTypeData,
    pub status: RequestStatusData,
    pub content_url: Option<String>,
    pub content_text: Option<String>,
    pub context: String,
    /// Credits a responder earns
    pub reward: i32,
    pub requester: UserSummaryData,
    pub community_id: String,
    pub community_name: String,
    pub has_responded: bool,
    pub created_at: DateTime<Utc>,
}

impl From<AvailableRequestRow> for AvailableRequestData {
    fn from(row: AvailableRequestRow) -> Self {
        let request = row.request;
        Self {
            id: request.id.to_string(),
            request_type: request.request_type.into(),
            status: request.status.into(),
            reward: request.request_type.cost(),
            content_url: request.content_url,
            content_text: request.content_text,
            context: request.context,
            requester: UserSummaryData::new(
                request.requester_id,
                row.requester_first_name.as_deref(),
                row.requester_last_name.as_deref(),
                row.requester_image_url,
            ),
            community_id: row.community_id.to_string(),
            community_name: row.community_name,
            has_responded: row.has_responded,
            created_at: request.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, juniper::GraphQLEnum)]
pub enum RequestViewerRoleData {
    Requester,
    Responder,
    CommunityMember,
}

impl From<RequestViewerRole> for RequestViewerRoleData {
    fn from(role: RequestViewerRole) -> Self {
        match role {
            RequestViewerRole::Requester => Self::Requester,
            RequestViewerRole::Responder => Self::Responder,
            RequestViewerRole::CommunityMember => Self::CommunityMember,
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct RequestDetailData {
    pub id: String,
    pub request_type: RequestTypeData,
    pub status: RequestStatusData,
    pub content_url: Option<String>,
    pub content_text: Option<String>,
    pub context: String,
    pub cost: i32,
    pub requester: UserSummaryData,
    pub communities: Vec<CommunityRefData>,
    pub responses: Vec<FeedbackResponseData>,
    pub viewer_role: RequestViewerRoleData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RequestDetail> for RequestDetailData {
    fn from(detail: RequestDetail) -> Self {
        let request = detail.request;
        Self {
            id: request.id.to_string(),
            request_type: request.request_type.into(),
            status: request.status.into(),
            cost: request.request_type.cost(),
            content_url: request.content_url,
            content_text: request.content_text,
            context: request.context,
            requester: UserSummaryData::from(&detail.requester),
            communities: detail.communities.iter().map(CommunityRefData::from).collect(),
            responses: detail
                .responses
                .into_iter()
                .map(FeedbackResponseData::from)
                .collect(),
            viewer_role: detail.viewer_role.into(),
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct CreateRequestResult {
    pub id: String,
    pub request_type: RequestTypeData,
    pub status: RequestStatusData,
    pub community_ids: Vec<String>,
    pub credits_spent: i32,
    /// Requester's balance after the debit
    pub remaining_credits: i32,
    pub created_at: DateTime<Utc>,
}

impl From<CreatedRequest> for CreateRequestResult {
    fn from(created: CreatedRequest) -> Self {
        Self {
            id: created.request.id.to_string(),
            request_type: created.request.request_type.into(),
            status: created.request.status.into(),
            community_ids: created.community_ids.iter().map(ToString::to_string).collect(),
            credits_spent: created.credits_spent,
            remaining_credits: created.remaining_credits,
            created_at: created.request.created_at,
        }
    }
}
