//! GraphQL schema definition.
//!
//! Operations are grouped by namespace (`community`, `feedback`, `user`) on
//! both roots, so clients call e.g. `mutation { feedback { createRequest(...) } }`.
//! Resolvers stay thin and delegate to each domain's edges.

use super::context::GraphQLContext;
use juniper::{EmptySubscription, FieldResult, RootNode};

use crate::domains::communities::data::{CommunityData, CommunityDetailsData, MembershipResult};
use crate::domains::communities::edges as community_edges;
use crate::domains::feedback::data::{
    AvailableRequestData, CreateRequestInput, CreateRequestResult, MyRequestData,
    RequestDetailData, RequestTypeData, SubmitEvaluationInput, SubmitEvaluationResult,
    SubmitResponseInput, SubmitResponseResult,
};
use crate::domains::feedback::edges as feedback_edges;
use crate::domains::users::data::{UpdateProfileInput, UserData};
use crate::domains::users::edges as user_edges;

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    fn community() -> CommunityQuery {
        CommunityQuery
    }

    fn feedback() -> FeedbackQuery {
        FeedbackQuery
    }

    fn user() -> UserQuery {
        UserQuery
    }
}

pub struct CommunityQuery;

#[juniper::graphql_object(context = GraphQLContext)]
impl CommunityQuery {
    /// All communities with member counts and the caller's membership
    async fn get_all_communities(ctx: &GraphQLContext) -> FieldResult<Vec<CommunityData>> {
        community_edges::get_all_communities(ctx).await
    }

    async fn get_community_details(
        ctx: &GraphQLContext,
        community_id: String,
    ) -> FieldResult<CommunityDetailsData> {
        community_edges::get_community_details(community_id, ctx).await
    }
}

pub struct FeedbackQuery;

#[juniper::graphql_object(context = GraphQLContext)]
impl FeedbackQuery {
    /// Requests created by the caller, newest first
    async fn get_my_requests(ctx: &GraphQLContext) -> FieldResult<Vec<MyRequestData>> {
        feedback_edges::get_my_requests(ctx).await
    }

    /// Requests the caller can answer (pending first, then oldest first)
    async fn get_available_requests(
        ctx: &GraphQLContext,
        community_id: Option<String>,
        request_type: Option<RequestTypeData>,
    ) -> FieldResult<Vec<AvailableRequestData>> {
        feedback_edges::get_available_requests(community_id, request_type, ctx).await
    }

    async fn get_request_by_id(
        ctx: &GraphQLContext,
        request_id: String,
    ) -> FieldResult<RequestDetailData> {
        feedback_edges::get_request_by_id(request_id, ctx).await
    }
}

pub struct UserQuery;

#[juniper::graphql_object(context = GraphQLContext)]
impl UserQuery {
    async fn get_current(ctx: &GraphQLContext) -> FieldResult<UserData> {
        user_edges::get_current_user(ctx).await
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    fn community() -> CommunityMutation {
        CommunityMutation
    }

    fn feedback() -> FeedbackMutation {
        FeedbackMutation
    }

    fn user() -> UserMutation {
        UserMutation
    }
}

pub struct CommunityMutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl CommunityMutation {
    async fn join_community(
        ctx: &GraphQLContext,
        community_id: String,
    ) -> FieldResult<MembershipResult> {
        community_edges::join_community(community_id, ctx).await
    }

    async fn leave_community(
        ctx: &GraphQLContext,
        community_id: String,
    ) -> FieldResult<MembershipResult> {
        community_edges::leave_community(community_id, ctx).await
    }
}

pub struct FeedbackMutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl FeedbackMutation {
    /// Post a request to one or more of the caller's communities (debits its cost)
    async fn create_request(
        ctx: &GraphQLContext,
        input: CreateRequestInput,
    ) -> FieldResult<CreateRequestResult> {
        feedback_edges::create_request(input, ctx).await
    }

    /// Answer a pending request (credits the request's cost)
    async fn submit_response(
        ctx: &GraphQLContext,
        input: SubmitResponseInput,
    ) -> FieldResult<SubmitResponseResult> {
        feedback_edges::submit_response(input, ctx).await
    }

    /// Rate the response to one of the caller's requests (credits the rating bonus)
    async fn submit_evaluation(
        ctx: &GraphQLContext,
        input: SubmitEvaluationInput,
    ) -> FieldResult<SubmitEvaluationResult> {
        feedback_edges::submit_evaluation(input, ctx).await
    }
}

pub struct UserMutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl UserMutation {
    async fn complete_onboarding(
        ctx: &GraphQLContext,
        community_ids: Vec<String>,
    ) -> FieldResult<UserData> {
        user_edges::complete_onboarding(community_ids, ctx).await
    }

    async fn update_profile(
        ctx: &GraphQLContext,
        input: UpdateProfileInput,
    ) -> FieldResult<UserData> {
        user_edges::update_profile(input, ctx).await
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
