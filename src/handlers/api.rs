// handlers/api.rs - GET /api and GET /health

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::database::models::TableInfo;
use crate::middleware::{ApiResponse, ApiResult};

use super::AppState;

/// GET /api - tables visible in the connected database
pub async fn list_tables(State(state): State<AppState>) -> ApiResult<Vec<TableInfo>> {
    let tables = state.store.list_tables().await?;
    Ok(ApiResponse::success("tables", tables))
}

/// GET /health - 200 when the store answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "database": "ok",
                "timestamp": now,
            })),
        ),
        Err(e) => {
            warn!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "database": "unavailable",
                    "timestamp": now,
                })),
            )
        }
    }
}
