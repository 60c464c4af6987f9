//! Integration tests for community listing and membership.

mod common;

use common::{fixtures, GraphQLClient, TestHarness};
use serde_json::Value;
use skillswap_core::domains::communities::Community;
use test_context::test_context;

async fn membership(client: &GraphQLClient, action: &str, community_id: &str) -> common::GraphQLResult {
    let query = format!(
        r#"mutation {{
            community {{
                {action}(communityId: "{community_id}") {{ communityId isMember changed }}
            }}
        }}"#
    );
    client.execute(&query).await
}

async fn listed(client: &GraphQLClient, community: &Community) -> Value {
    let data = client
        .query("query { community { getAllCommunities { id name memberCount isMember } } }")
        .await;
    data["community"]["getAllCommunities"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == community.id.to_string().as_str())
        .cloned()
        .expect("community missing from listing")
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_default_communities_are_seeded(ctx: &TestHarness) {
    let user = fixtures::create_user(&ctx.db_pool, 0).await.unwrap();

    let data = ctx
        .graphql_as(&user)
        .query("query { community { getAllCommunities { name } } }")
        .await;
    let names: Vec<&str> = data["community"]["getAllCommunities"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();

    assert!(names.contains(&"General Career Advice"));
    assert!(names.contains(&"Software Engineering Hub"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_join_and_leave_community(ctx: &TestHarness) {
    let community = fixtures::create_community(&ctx.db_pool, "Joinable").await.unwrap();
    let user = fixtures::create_user(&ctx.db_pool, 0).await.unwrap();
    let client = ctx.graphql_as(&user);
    let id = community.id.to_string();

    let before = listed(&client, &community).await;
    assert_eq!(before["memberCount"], 0);
    assert_eq!(before["isMember"], false);

    let joined = membership(&client, "joinCommunity", &id).await;
    assert!(joined.is_ok(), "joinCommunity failed: {:?}", joined.errors);
    assert_eq!(joined.get("community.joinCommunity.isMember"), true);
    assert_eq!(joined.get("community.joinCommunity.changed"), true);

    let after_join = listed(&client, &community).await;
    assert_eq!(after_join["memberCount"], 1);
    assert_eq!(after_join["isMember"], true);

    let left = membership(&client, "leaveCommunity", &id).await;
    assert_eq!(left.get("community.leaveCommunity.isMember"), false);
    assert_eq!(left.get("community.leaveCommunity.changed"), true);

    let after_leave = listed(&client, &community).await;
    assert_eq!(after_leave["memberCount"], 0);
    assert_eq!(after_leave["isMember"], false);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_join_is_idempotent(ctx: &TestHarness) {
    let community = fixtures::create_community(&ctx.db_pool, "Twice").await.unwrap();
    let user = fixtures::create_user(&ctx.db_pool, 0).await.unwrap();
    let client = ctx.graphql_as(&user);
    let id = community.id.to_string();

    membership(&client, "joinCommunity", &id).await;
    let again = membership(&client, "joinCommunity", &id).await;

    assert!(again.is_ok(), "second join failed: {:?}", again.errors);
    assert_eq!(again.get("community.joinCommunity.isMember"), true);
    assert_eq!(again.get("community.joinCommunity.changed"), false);
    assert_eq!(listed(&client, &community).await["memberCount"], 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_leave_without_membership_is_noop(ctx: &TestHarness) {
    let community = fixtures::create_community(&ctx.db_pool, "Never").await.unwrap();
    let user = fixtures::create_user(&ctx.db_pool, 0).await.unwrap();

    let result = membership(&ctx.graphql_as(&user), "leaveCommunity", &community.id.to_string()).await;

    assert!(result.is_ok(), "leaveCommunity failed: {:?}", result.errors);
    assert_eq!(result.get("community.leaveCommunity.changed"), false);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_community_details_lists_members(ctx: &TestHarness) {
    let community = fixtures::create_community(&ctx.db_pool, "Details").await.unwrap();
    let member = fixtures::create_named_user(&ctx.db_pool, "Maya", 0).await.unwrap();
    let viewer = fixtures::create_user(&ctx.db_pool, 0).await.unwrap();
    fixtures::join(&ctx.db_pool, &member, &community).await.unwrap();

    let query = format!(
        r#"query {{
            community {{
                getCommunityDetails(communityId: "{}") {{
                    name memberCount isMember members {{ userId name }}
                }}
            }}
        }}"#,
        community.id
    );
    let data = ctx.graphql_as(&viewer).query(&query).await;
    let details = &data["community"]["getCommunityDetails"];

    assert_eq!(details["name"], community.name.as_str());
    assert_eq!(details["memberCount"], 1);
    assert_eq!(details["isMember"], false);
    assert_eq!(details["members"][0]["userId"], member.id.to_string());
    assert_eq!(details["members"][0]["name"], "Maya Tester");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_unknown_community_not_found(ctx: &TestHarness) {
    let user = fixtures::create_user(&ctx.db_pool, 0).await.unwrap();
    let client = ctx.graphql_as(&user);
    let unknown = uuid::Uuid::new_v4().to_string();

    let joined = membership(&client, "joinCommunity", &unknown).await;
    assert!(joined.has_code("NOT_FOUND"));

    let query = format!(
        r#"query {{ community {{ getCommunityDetails(communityId: "{unknown}") {{ id }} }} }}"#
    );
    assert!(client.execute(&query).await.has_code("NOT_FOUND"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_communities_require_session(ctx: &TestHarness) {
    let result = ctx
        .graphql()
        .execute("query { community { getAllCommunities { id } } }")
        .await;

    assert!(result.has_code("UNAUTHENTICATED"));
}
