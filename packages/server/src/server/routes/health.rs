use std::time::Duration;

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use sqlx::PgPool;
use tracing::warn;

use crate::server::app::AppState;

const DB_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: DatabaseHealth,
    pool: PoolHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    ok: bool,
    /// Latest applied migration, if the migrations table is readable
    #[serde(skip_serializing_if = "Option::is_none")]
    schema_version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PoolHealth {
    size: u32,
    idle: usize,
    max: u32,
}

async fn probe_database(pool: &PgPool) -> DatabaseHealth {
    let probe = sqlx::query_scalar::<_, Option<i64>>(
        "SELECT MAX(version) FROM _sqlx_migrations WHERE success",
    )
    .fetch_one(pool);

    match tokio::time::timeout(DB_PROBE_TIMEOUT, probe).await {
        Ok(Ok(schema_version)) => DatabaseHealth {
            ok: true,
            schema_version,
            error: None,
        },
        Ok(Err(e)) => DatabaseHealth {
            ok: false,
            schema_version: None,
            error: Some(format!("Query failed: {e}")),
        },
        Err(_) => DatabaseHealth {
            ok: false,
            schema_version: None,
            error: Some(format!("Query timeout (>{}s)", DB_PROBE_TIMEOUT.as_secs())),
        },
    }
}

/// Health check: 200 when the database answers, 503 otherwise
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = probe_database(&state.db_pool).await;
    let pool = PoolHealth {
        size: state.db_pool.size(),
        idle: state.db_pool.num_idle(),
        max: state.db_pool.options().get_max_connections(),
    };

    let (status_code, status) = if database.ok {
        (StatusCode::OK, "healthy")
    } else {
        warn!(error = ?database.error, "Health check failed");
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            database,
            pool,
        }),
    )
}
