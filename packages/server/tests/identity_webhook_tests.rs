//! Route-level tests for the identity provider webhook.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use common::{fixtures, TestHarness, TEST_STARTING_CREDITS, TEST_WEBHOOK_SECRET};
use serde_json::json;
use skillswap_core::domains::identity::WebhookVerifier;
use skillswap_core::domains::users::User;
use test_context::test_context;
use tower::ServiceExt;
use uuid::Uuid;

const WEBHOOK_PATH: &str = "/api/webhooks/identity";

fn user_payload(event_type: &str, external_id: &str, email: Option<&str>) -> Vec<u8> {
    let email_addresses = match email {
        Some(address) => json!([{ "id": "idn_primary", "email_address": address }]),
        None => json!([]),
    };
    json!({
        "type": event_type,
        "data": {
            "id": external_id,
            "email_addresses": email_addresses,
            "primary_email_address_id": "idn_primary",
            "first_name": "Webhook",
            "last_name": "User",
            "image_url": "https://img.example.com/avatar.png"
        }
    })
    .to_string()
    .into_bytes()
}

fn signed_request(body: Vec<u8>) -> Request<Body> {
    let verifier = WebhookVerifier::from_secret(TEST_WEBHOOK_SECRET).unwrap();
    let msg_id = format!("msg_{}", Uuid::new_v4().simple());
    let timestamp = chrono::Utc::now().timestamp().to_string();
    let signature = verifier.sign(&msg_id, &timestamp, &body);

    Request::builder()
        .method("POST")
        .uri(WEBHOOK_PATH)
        .header("content-type", "application/json")
        .header("svix-id", msg_id)
        .header("svix-timestamp", timestamp)
        .header("svix-signature", format!("v1,{signature}"))
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn new_external_id() -> String {
    format!("user_{}", Uuid::new_v4().simple())
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_user_created_provisions_user(ctx: &TestHarness) {
    let external_id = new_external_id();
    let email = format!("{}@example.com", Uuid::new_v4().simple());
    let request = signed_request(user_payload("user.created", &external_id, Some(&email)));

    let response = ctx.app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let user = User::find_by_external_id(&external_id, &ctx.db_pool)
        .await
        .unwrap()
        .expect("user provisioned");
    assert_eq!(user.email, email);
    assert_eq!(user.first_name.as_deref(), Some("Webhook"));
    assert_eq!(user.credits, TEST_STARTING_CREDITS);
    assert!(!user.has_completed_onboarding);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_replayed_user_created_does_not_duplicate(ctx: &TestHarness) {
    let external_id = new_external_id();
    let email = format!("{}@example.com", Uuid::new_v4().simple());
    let payload = user_payload("user.created", &external_id, Some(&email));

    let first = ctx.app().oneshot(signed_request(payload.clone())).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let provisioned = User::find_by_external_id(&external_id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();

    // Spend some credits so a re-provision would be visible
    sqlx::query("UPDATE users SET credits = 3 WHERE id = $1")
        .bind(provisioned.id)
        .execute(&ctx.db_pool)
        .await
        .unwrap();

    let replay = ctx.app().oneshot(signed_request(payload)).await.unwrap();
    assert_eq!(replay.status(), StatusCode::OK);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE external_id = $1")
        .bind(&external_id)
        .fetch_one(&ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(fixtures::credits_of(&ctx.db_pool, &provisioned).await.unwrap(), 3);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_user_updated_changes_identity_fields(ctx: &TestHarness) {
    let external_id = new_external_id();
    let original = format!("{}@example.com", Uuid::new_v4().simple());
    let changed = format!("{}@example.org", Uuid::new_v4().simple());

    ctx.app()
        .oneshot(signed_request(user_payload("user.created", &external_id, Some(&original))))
        .await
        .unwrap();

    let response = ctx
        .app()
        .oneshot(signed_request(user_payload("user.updated", &external_id, Some(&changed))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let user = User::find_by_external_id(&external_id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.email, changed);
    assert_eq!(user.credits, TEST_STARTING_CREDITS);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_missing_email_is_acknowledged(ctx: &TestHarness) {
    let external_id = new_external_id();

    let response = ctx
        .app()
        .oneshot(signed_request(user_payload("user.created", &external_id, None)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.starts_with("Webhook received"));
    assert!(User::find_by_external_id(&external_id, &ctx.db_pool)
        .await
        .unwrap()
        .is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_unhandled_event_type_is_acknowledged(ctx: &TestHarness) {
    let body = json!({ "type": "session.created", "data": { "id": "sess_1" } })
        .to_string()
        .into_bytes();

    let response = ctx.app().oneshot(signed_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_bad_signature_rejected(ctx: &TestHarness) {
    let external_id = new_external_id();
    let mut request = signed_request(user_payload(
        "user.created",
        &external_id,
        Some("forged@example.com"),
    ));
    request.headers_mut().insert(
        "svix-signature",
        "v1,AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=".parse().unwrap(),
    );

    let response = ctx.app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(User::find_by_external_id(&external_id, &ctx.db_pool)
        .await
        .unwrap()
        .is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_missing_headers_rejected(ctx: &TestHarness) {
    let request = Request::builder()
        .method("POST")
        .uri(WEBHOOK_PATH)
        .header("content-type", "application/json")
        .body(Body::from(user_payload(
            "user.created",
            &new_external_id(),
            Some("nobody@example.com"),
        )))
        .unwrap();

    let response = ctx.app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_out_of_range_timestamp_rejected(ctx: &TestHarness) {
    let mut request = signed_request(user_payload(
        "user.created",
        &new_external_id(),
        Some("overflow@example.com"),
    ));
    request
        .headers_mut()
        .insert("svix-timestamp", i64::MIN.to_string().parse().unwrap());

    let response = ctx.app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_invalid_json_rejected(ctx: &TestHarness) {
    let response = ctx
        .app()
        .oneshot(signed_request(b"{not json".to_vec()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_missing_secret_is_server_error(ctx: &TestHarness) {
    let request = signed_request(user_payload(
        "user.created",
        &new_external_id(),
        Some("unconfigured@example.com"),
    ));

    let response = ctx.app_without_webhook_secret().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
