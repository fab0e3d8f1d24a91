use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Article, Comment, NewComment, TableInfo, Topic, User};
use crate::database::query_builder::SqlValue;
use crate::database::schema::{ColumnDef, Table};
use crate::query::ArticleQuery;

/// Every read and write the handlers perform against the relational store.
///
/// Implementations must be safe to share across requests; the server holds a
/// single instance behind an `Arc` for the life of the process.
#[async_trait]
pub trait Store: Send + Sync {
    /// Non-system tables, for the `GET /api` diagnostic listing
    async fn list_tables(&self) -> Result<Vec<TableInfo>, DatabaseError>;

    async fn list_topics(&self) -> Result<Vec<Topic>, DatabaseError>;

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError>;

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>, DatabaseError>;

    async fn find_article(&self, article_id: i32) -> Result<Option<Article>, DatabaseError>;

    /// Applies `votes = votes + delta` in one statement. `None` when no row matched.
    async fn increment_article_votes(&self, article_id: i32, delta: i32) -> Result<Option<Article>, DatabaseError>;

    /// Comments for one article, newest first
    async fn list_comments(&self, article_id: i32) -> Result<Vec<Comment>, DatabaseError>;

    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment, DatabaseError>;

    /// True when at least one row of `table` has `column = value`
    async fn row_exists(&self, table: Table, column: &'static ColumnDef, value: &SqlValue) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;

    async fn close(&self);
}
