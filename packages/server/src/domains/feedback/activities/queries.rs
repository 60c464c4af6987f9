use std::collections::HashMap;

use crate::common::{DomainError, FeedbackRequestId};
use crate::domains::communities::Membership;
use crate::domains::feedback::models::{
    AvailableRequestFilter, AvailableRequestRow, FeedbackRequest, MyRequestRow,
    RequestCommunityRow, ResponseDetailRow,
};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// A request on the requester's dashboard with its target communities
#[derive(Debug, Clone)]
pub struct MyRequest {
    pub row: MyRequestRow,
    pub communities: Vec<RequestCommunityRow>,
}

/// How the viewer relates to a request they are looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestViewerRole {
    Requester,
    Responder,
    CommunityMember,
}

#[derive(Debug, Clone)]
pub struct RequestDetail {
    pub request: FeedbackRequest,
    pub requester: User,
    pub communities: Vec<RequestCommunityRow>,
    /// Responses the viewer may see: all for the requester, their own for a
    /// responder, none otherwise
    pub responses: Vec<ResponseDetailRow>,
    pub viewer_role: RequestViewerRole,
}

async fn communities_by_request(
    request_ids: &[FeedbackRequestId],
    deps: &ServerDeps,
) -> Result<HashMap<FeedbackRequestId, Vec<RequestCommunityRow>>, DomainError> {
    let mut grouped: HashMap<FeedbackRequestId, Vec<RequestCommunityRow>> = HashMap::new();
    if request_ids.is_empty() {
        return Ok(grouped);
    }

    for row in RequestCommunityRow::find_for_requests(request_ids, &deps.db_pool).await? {
        grouped.entry(row.request_id).or_default().push(row);
    }
    Ok(grouped)
}

/// The caller's own requests, newest first
pub async fn get_my_requests(user: &User, deps: &ServerDeps) -> Result<Vec<MyRequest>, DomainError> {
    let rows = MyRequestRow::find_for_requester(user.id, &deps.db_pool).await?;
    let ids: Vec<FeedbackRequestId> = rows.iter().map(|row| row.request.id).collect();
    let mut communities = communities_by_request(&ids, deps).await?;

    Ok(rows
        .into_iter()
        .map(|row| MyRequest {
            communities: communities.remove(&row.request.id).unwrap_or_default(),
            row,
        })
        .collect())
}

/// Requests the caller can answer, and those they already answered
pub async fn get_available_requests(
    user: &User,
    filter: AvailableRequestFilter,
    deps: &ServerDeps,
) -> Result<Vec<AvailableRequestRow>, DomainError> {
    Ok(AvailableRequestRow::find_for_viewer(user.id, &filter, &deps.db_pool).await?)
}

pub async fn get_request_by_id(
    viewer: &User,
    request_id: FeedbackRequestId,
    deps: &ServerDeps,
) -> Result<RequestDetail, DomainError> {
    let request = FeedbackRequest::find_by_id(request_id, &deps.db_pool)
        .await?
        .ok_or(DomainError::NotFound("Feedback request"))?;

    let responses = ResponseDetailRow::find_for_request(request.id, &deps.db_pool).await?;

    let (viewer_role, responses) = if request.requester_id == viewer.id {
        (RequestViewerRole::Requester, responses)
    } else if responses.iter().any(|r| r.response.responder_id == viewer.id) {
        let own = responses
            .into_iter()
            .filter(|r| r.response.responder_id == viewer.id)
            .collect();
        (RequestViewerRole::Responder, own)
    } else if Membership::shares_request_community(viewer.id, request.id, &deps.db_pool).await? {
        (RequestViewerRole::CommunityMember, Vec::new())
    } else {
        return Err(DomainError::not_authorized(
            "This request is not shared with any of your communities",
        ));
    };

    let requester = User::find_by_id(request.requester_id, &deps.db_pool)
        .await?
        .ok_or(DomainError::NotFound("User"))?;

    let communities = communities_by_request(&[request.id], deps)
        .await?
        .remove(&request.id)
        .unwrap_or_default();

    Ok(RequestDetail {
        request,
        requester,
        communities,
        responses,
        viewer_role,
    })
}
