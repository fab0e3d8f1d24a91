// handlers/comments.rs - /api/articles/:article_id/comments

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde_json::{Map, Value};

use crate::database::models::{Comment, NewComment};
use crate::database::schema::Table;
use crate::middleware::{ApiResponse, ApiResult};
use crate::validation::{body_fields, validate_body_shape, validate_exists, ValidationError};

use super::params::existing_article_id;
use super::AppState;

/// GET /api/articles/:article_id/comments, newest first
pub async fn list_comments(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Vec<Comment>> {
    let Path(raw_id) = path?;
    let article_id = existing_article_id(state.store.as_ref(), &raw_id).await?;
    let comments = state.store.list_comments(article_id).await?;
    Ok(ApiResponse::success("comments", comments))
}

/// POST /api/articles/:article_id/comments with `{ "username", "body" }`
pub async fn post_comment(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Comment> {
    let Path(raw_id) = path?;
    let article_id = existing_article_id(state.store.as_ref(), &raw_id).await?;

    let Json(body) = payload?;
    let columns = comment_columns(body_fields(&body)?)?;
    let fields = validate_body_shape(&columns, Table::Comments)?;
    let author = fields.require_text("author")?;
    let text = fields.require_text("body")?;

    validate_exists(state.store.as_ref(), &author, "username", Table::Users)
        .await
        .map_err(ValidationError::as_reference)?;

    let comment = state
        .store
        .insert_comment(&NewComment {
            article_id,
            author,
            body: text,
        })
        .await?;
    Ok(ApiResponse::created("comment", comment))
}

/// Map request field names onto comment columns. `username` is stored as `author`.
fn comment_columns(fields: &Map<String, Value>) -> Result<Map<String, Value>, ValidationError> {
    let mut columns = Map::new();
    for (field, value) in fields {
        let column = match field.as_str() {
            "username" => "author",
            "body" => "body",
            other => return Err(ValidationError::UnexpectedField(other.to_string())),
        };
        columns.insert(column.to_string(), value.clone());
    }
    Ok(columns)
}
