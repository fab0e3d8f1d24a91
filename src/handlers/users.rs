use axum::extract::State;

use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};

use super::AppState;

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state.store.list_users().await?;
    Ok(ApiResponse::success("users", users))
}
