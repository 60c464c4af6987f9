use juniper::GraphQLInputObject;

use super::RequestTypeData;

#[derive(Debug, Clone, GraphQLInputObject)]
pub struct CreateRequestInput {
    pub request_type: RequestTypeData,
    pub content_url: Option<String>,
    pub content_text: Option<String>,
    /// What the requester wants reviewers to focus on
    pub context: Option<String>,
    pub community_ids: Vec<String>,
}

#[derive(Debug, Clone, GraphQLInputObject)]
pub struct SubmitResponseInput {
    pub request_id: String,
    pub feedback_text: String,
}

#[derive(Debug, Clone, GraphQLInputObject)]
pub struct SubmitEvaluationInput {
    pub response_id: String,
    /// 3 = okay, 4 = helpful, 5 = super insightful
    pub rating: i32,
    pub evaluation_text: Option<String>,
}
