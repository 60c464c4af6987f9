use tracing::info;

use crate::common::{CommunityId, DomainError};
use crate::domains::communities::{Community, Membership};
use crate::domains::feedback::ledger::UnitOfWork;
use crate::domains::feedback::lifecycle::RequestType;
use crate::domains::feedback::models::{FeedbackRequest, NewFeedbackRequest};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub request_type: RequestType,
    pub content_url: Option<String>,
    pub content_text: Option<String>,
    pub context: String,
    pub community_ids: Vec<CommunityId>,
}

#[derive(Debug, Clone)]
pub struct CreatedRequest {
    pub request: FeedbackRequest,
    pub community_ids: Vec<CommunityId>,
    pub credits_spent: i32,
    pub remaining_credits: i32,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Broadcast a new feedback request to the given communities, paying its cost.
pub async fn create_request(
    requester: &User,
    input: CreateRequest,
    deps: &ServerDeps,
) -> Result<CreatedRequest, DomainError> {
    let mut community_ids = input.community_ids;
    community_ids.sort();
    community_ids.dedup();

    if community_ids.is_empty() {
        return Err(DomainError::validation(
            "Select at least one community for the request",
        ));
    }

    let content_url = non_blank(input.content_url);
    let content_text = non_blank(input.content_text);
    if content_url.is_none() && content_text.is_none() {
        return Err(DomainError::validation(
            "Provide a link or paste the content to review",
        ));
    }

    let cost = input.request_type.cost();
    let mut uow = UnitOfWork::begin(&deps.db_pool).await?;

    if !Community::find_missing(&community_ids, uow.conn()).await?.is_empty() {
        return Err(DomainError::NotFound("Community"));
    }

    let outside = Membership::find_non_member_communities(requester.id, &community_ids, uow.conn())
        .await?;
    if !outside.is_empty() {
        return Err(DomainError::not_authorized(
            "You can only post requests to communities you belong to",
        ));
    }

    let remaining_credits = uow.debit(requester.id, cost).await?;

    let new_request = NewFeedbackRequest::builder()
        .requester_id(requester.id)
        .request_type(input.request_type)
        .content_url(content_url)
        .content_text(content_text)
        .context(input.context.trim())
        .build();

    let request = FeedbackRequest::insert(&new_request, uow.conn()).await?;
    FeedbackRequest::attach_communities(request.id, &community_ids, uow.conn()).await?;

    uow.commit().await?;

    info!(
        request_id = %request.id,
        requester_id = %requester.id,
        request_type = %request.request_type,
        communities = community_ids.len(),
        cost,
        "Feedback request created"
    );

    Ok(CreatedRequest {
        request,
        community_ids,
        credits_spent: cost,
        remaining_credits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(
            non_blank(Some(" https://example.com ".to_string())).as_deref(),
            Some("https://example.com")
        );
        assert_eq!(non_blank(None), None);
    }
}
