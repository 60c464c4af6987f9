//! Identity provider webhook endpoint

use axum::{
    body::Bytes,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::domains::identity::activities::{handle_event, EventOutcome};
use crate::domains::identity::{IdentityEvent, WebhookHeaders};
use crate::server::app::AppState;
use crate::server::middleware::ClientIp;

/// `POST /api/webhooks/identity`
///
/// 400 for anything that fails verification or parsing, 500 when we cannot
/// process a genuine delivery (so the provider retries), 200 otherwise.
pub async fn identity_webhook_handler(
    Extension(state): Extension<AppState>,
    client_ip: Option<Extension<ClientIp>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let source = client_ip.map(|Extension(ClientIp(ip))| ip.to_string());

    let Some(verifier) = state.server_deps.webhook_verifier.as_ref() else {
        error!("Identity webhook secret is not configured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error: webhook secret is not configured",
        )
            .into_response();
    };

    let signing_headers = match WebhookHeaders::from_header_map(&headers) {
        Ok(signing_headers) => signing_headers,
        Err(e) => {
            warn!(error = %e, source = ?source, "Rejected identity webhook");
            return (StatusCode::BAD_REQUEST, "Error: missing signature headers").into_response();
        }
    };

    if let Err(e) = verifier.verify(&signing_headers, &body, Utc::now()) {
        warn!(
            error = %e,
            msg_id = %signing_headers.id,
            source = ?source,
            "Identity webhook signature verification failed"
        );
        return (StatusCode::BAD_REQUEST, "Error: signature verification failed").into_response();
    }

    let event = match IdentityEvent::parse(&body) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, msg_id = %signing_headers.id, "Identity webhook payload is not valid");
            return (StatusCode::BAD_REQUEST, "Error: invalid payload").into_response();
        }
    };

    let event_type = event.event_type().to_string();
    info!(msg_id = %signing_headers.id, event_type = %event_type, "Identity webhook received");

    match handle_event(event, &state.server_deps).await {
        Ok(EventOutcome::Acknowledged(reason)) => {
            (StatusCode::OK, format!("Webhook received: {reason}")).into_response()
        }
        Ok(_) => (StatusCode::OK, "Webhook processed successfully").into_response(),
        Err(e) => {
            error!(
                error = %e,
                msg_id = %signing_headers.id,
                event_type = %event_type,
                "Failed to process identity webhook"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error: failed to process webhook",
            )
                .into_response()
        }
    }
}
