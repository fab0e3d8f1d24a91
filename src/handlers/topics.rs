use axum::extract::State;

use crate::database::models::Topic;
use crate::middleware::{ApiResponse, ApiResult};

use super::AppState;

/// GET /api/topics
pub async fn list_topics(State(state): State<AppState>) -> ApiResult<Vec<Topic>> {
    let topics = state.store.list_topics().await?;
    Ok(ApiResponse::success("topics", topics))
}
