use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use juniper::http::{graphiql::graphiql_source, GraphQLBatchRequest, GraphQLRequest};
use tracing::debug;

use crate::server::graphql::{GraphQLContext, Schema};

const GRAPHQL_PATH: &str = "/graphql";

/// Parse/validation failures are 400; resolver errors still answer 200 with
/// an `errors` array so clients can read partial data and error codes.
fn status_for(is_ok: bool) -> StatusCode {
    if is_ok {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    }
}

/// Single operation
pub async fn graphql_handler(
    State(schema): State<Arc<Schema>>,
    Extension(context): Extension<GraphQLContext>,
    Json(request): Json<GraphQLRequest>,
) -> Response {
    let response = request.execute(&schema, &context).await;
    let is_ok = response.is_ok();
    if !is_ok {
        debug!(authenticated = context.auth_user.is_some(), "GraphQL request rejected");
    }

    (status_for(is_ok), Json(response)).into_response()
}

/// Batched operations, executed in order against one context
pub async fn graphql_batch_handler(
    State(schema): State<Arc<Schema>>,
    Extension(context): Extension<GraphQLContext>,
    Json(batch): Json<GraphQLBatchRequest>,
) -> Response {
    let response = batch.execute(&schema, &context).await;

    (status_for(response.is_ok()), Json(response)).into_response()
}

/// GraphiQL pointed at this server's endpoint (debug builds only)
pub async fn graphql_playground() -> Html<String> {
    Html(graphiql_source(GRAPHQL_PATH, None))
}
