// handlers/articles.rs - /api/articles and /api/articles/:article_id

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde_json::Value;

use crate::database::models::Article;
use crate::database::schema::Table;
use crate::error::{ApiError, PARAMETRIC_NOT_FOUND};
use crate::middleware::{ApiResponse, ApiResult};
use crate::query::ArticleQuery;
use crate::validation::{body_fields, validate_body_shape};

use super::params::existing_article_id;
use super::AppState;

/// GET /api/articles?sort_by=&order=&topic=
///
/// The query string is taken as raw pairs so repeated and unknown keys can be
/// rejected instead of silently dropped.
pub async fn list_articles(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Vec<Article>> {
    let Query(pairs) = query?;
    let query = ArticleQuery::from_pairs(pairs)?;
    let articles = state.store.list_articles(&query).await?;
    Ok(ApiResponse::success("articles", articles))
}

/// GET /api/articles/:article_id
pub async fn get_article(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Article> {
    let Path(raw_id) = path?;
    let article_id = existing_article_id(state.store.as_ref(), &raw_id).await?;
    let article = state
        .store
        .find_article(article_id)
        .await?
        .ok_or(ApiError::NotFound(PARAMETRIC_NOT_FOUND))?;
    Ok(ApiResponse::success("article", article))
}

/// PATCH /api/articles/:article_id with `{ "votes": n }`: adds n to the current votes
pub async fn patch_article(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Article> {
    let Path(raw_id) = path?;
    let article_id = existing_article_id(state.store.as_ref(), &raw_id).await?;

    let Json(body) = payload?;
    let changes = validate_body_shape(body_fields(&body)?, Table::Articles)?.only(&["votes"])?;
    let delta = changes.require_int("votes")?;

    let article = state
        .store
        .increment_article_votes(article_id, delta)
        .await?
        .ok_or(ApiError::NotFound(PARAMETRIC_NOT_FOUND))?;
    Ok(ApiResponse::success("article", article))
}
