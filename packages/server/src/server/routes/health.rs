use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;

use crate::common::response::{self, MsgCode};
use crate::server::app::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    status: String,
    database: DatabaseHealth,
    connection_pool: ConnectionPoolHealth,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPoolHealth {
    size: u32,
    idle_connections: usize,
    max_connections: u32,
}

/// Health check endpoint
///
/// Probes database connectivity with a 5s timeout and reports pool
/// utilization. Returns 200 when healthy, 503 otherwise.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Response {
    let database = match tokio::time::timeout(
        std::time::Duration::from_secs(5),
        sqlx::query("SELECT 1").execute(&state.db_pool),
    )
    .await
    {
        Ok(Ok(_)) => DatabaseHealth {
            status: "ok".to_string(),
            error: None,
        },
        Ok(Err(e)) => DatabaseHealth {
            status: "error".to_string(),
            error: Some(format!("Query failed: {}", e)),
        },
        Err(_) => DatabaseHealth {
            status: "error".to_string(),
            error: Some("Query timeout (>5s)".to_string()),
        },
    };

    let pool_options = state.db_pool.options();
    let connection_pool = ConnectionPoolHealth {
        size: state.db_pool.size(),
        idle_connections: state.db_pool.num_idle(),
        max_connections: pool_options.get_max_connections(),
    };

    let is_healthy = database.status == "ok";
    let report = HealthReport {
        status: if is_healthy { "healthy" } else { "unhealthy" }.to_string(),
        database,
        connection_pool,
    };

    if is_healthy {
        response::success(MsgCode::HealthOk, StatusCode::OK, report)
    } else {
        response::error(
            MsgCode::InternalServerError,
            StatusCode::SERVICE_UNAVAILABLE,
            serde_json::to_value(report).ok(),
        )
    }
}
