use crate::database::schema::Table;
use crate::database::store::Store;
use crate::error::ApiError;
use crate::validation::validate_exists;

/// Resolve `:article_id` to the id of an existing article.
///
/// 400 when the segment is not all digits, 404 when no article has that id.
pub async fn existing_article_id(store: &dyn Store, raw: &str) -> Result<i32, ApiError> {
    let value = validate_exists(store, raw, "article_id", Table::Articles).await?;
    value
        .as_int()
        .ok_or_else(|| ApiError::server(format!("article_id {} resolved to a non-integer", raw)))
}
