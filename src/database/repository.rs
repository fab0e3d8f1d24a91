use async_trait::async_trait;
use sqlx::Row;
use tracing::info;

use crate::database::manager::{DatabaseError, PgStore};
use crate::database::models::{Article, Comment, NewComment, TableInfo, Topic, User};
use crate::database::query_builder::{SqlResult, SqlValue};
use crate::database::schema::{ColumnDef, Table};
use crate::database::store::Store;
use crate::query::article_query::ARTICLE_SELECT;
use crate::query::ArticleQuery;

const COMMENT_COLUMNS: &str = "comment_id, article_id, author, body, votes, created_at";

#[async_trait]
impl Store for PgStore {
    async fn list_tables(&self) -> Result<Vec<TableInfo>, DatabaseError> {
        let sql = "SELECT schemaname::text AS schemaname, tablename::text AS tablename
                   FROM pg_catalog.pg_tables
                   WHERE schemaname NOT IN ('pg_catalog', 'information_schema')
                   ORDER BY tablename";
        self.timed("list_tables", sql, sqlx::query_as::<_, TableInfo>(sql).fetch_all(self.pool()))
            .await
    }

    async fn list_topics(&self) -> Result<Vec<Topic>, DatabaseError> {
        let sql = "SELECT slug, description FROM topics ORDER BY slug";
        self.timed("list_topics", sql, sqlx::query_as::<_, Topic>(sql).fetch_all(self.pool()))
            .await
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let sql = "SELECT username, name, avatar_url FROM users ORDER BY username";
        self.timed("list_users", sql, sqlx::query_as::<_, User>(sql).fetch_all(self.pool()))
            .await
    }

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>, DatabaseError> {
        let sql = query.to_sql();
        self.timed(
            "list_articles",
            &sql.query,
            sql.to_query_as::<Article>().fetch_all(self.pool()),
        )
        .await
    }

    async fn find_article(&self, article_id: i32) -> Result<Option<Article>, DatabaseError> {
        let sql = format!("{} WHERE articles.article_id = $1 GROUP BY articles.article_id", ARTICLE_SELECT);
        self.timed(
            "find_article",
            &sql,
            sqlx::query_as::<_, Article>(&sql).bind(article_id).fetch_optional(self.pool()),
        )
        .await
    }

    async fn increment_article_votes(&self, article_id: i32, delta: i32) -> Result<Option<Article>, DatabaseError> {
        // votes = votes + $1: increments must never be read-modify-write
        let sql = "WITH updated AS (
                       UPDATE articles SET votes = votes + $1 WHERE article_id = $2 RETURNING *
                   )
                   SELECT updated.article_id, updated.title, updated.topic, updated.author,
                          updated.body, updated.created_at, updated.votes,
                          (SELECT COUNT(*) FROM comments WHERE comments.article_id = updated.article_id)
                              AS comment_count
                   FROM updated";
        let article = self
            .timed(
                "increment_article_votes",
                sql,
                sqlx::query_as::<_, Article>(sql)
                    .bind(delta)
                    .bind(article_id)
                    .fetch_optional(self.pool()),
            )
            .await?;

        if let Some(a) = &article {
            info!(article_id, delta, votes = a.votes, "article votes updated");
        }
        Ok(article)
    }

    async fn list_comments(&self, article_id: i32) -> Result<Vec<Comment>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM comments WHERE article_id = $1 ORDER BY created_at DESC, comment_id DESC",
            COMMENT_COLUMNS
        );
        self.timed(
            "list_comments",
            &sql,
            sqlx::query_as::<_, Comment>(&sql).bind(article_id).fetch_all(self.pool()),
        )
        .await
    }

    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment, DatabaseError> {
        let sql = format!(
            "INSERT INTO comments (article_id, author, body) VALUES ($1, $2, $3) RETURNING {}",
            COMMENT_COLUMNS
        );
        let inserted = self
            .timed(
                "insert_comment",
                &sql,
                sqlx::query_as::<_, Comment>(&sql)
                    .bind(comment.article_id)
                    .bind(comment.author.as_str())
                    .bind(comment.body.as_str())
                    .fetch_one(self.pool()),
            )
            .await?;

        info!(
            comment_id = inserted.comment_id,
            article_id = inserted.article_id,
            author = %inserted.author,
            "comment created"
        );
        Ok(inserted)
    }

    async fn row_exists(&self, table: Table, column: &'static ColumnDef, value: &SqlValue) -> Result<bool, DatabaseError> {
        let sql = exists_sql(table, column, value)?;
        let row = self
            .timed("row_exists", &sql.query, sql.to_query().fetch_one(self.pool()))
            .await?;
        Ok(row.try_get::<bool, _>("present")?)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        let sql = "SELECT 1";
        self.timed("health_check", sql, sqlx::query(sql).execute(self.pool()))
            .await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool().close().await;
        info!("Closed database pool");
    }
}

/// Existence probe. Both identifiers come from the schema catalog, never from the caller.
fn exists_sql(table: Table, column: &'static ColumnDef, value: &SqlValue) -> Result<SqlResult, DatabaseError> {
    if table.column(column.name) != Some(column) {
        return Err(DatabaseError::QueryError(format!(
            "column {} does not belong to table {}",
            column.name, table
        )));
    }

    let mut sql = SqlResult::new("");
    let placeholder = sql.push_param(value.clone());
    sql.query = format!(
        "SELECT EXISTS (SELECT 1 FROM \"{}\" WHERE \"{}\" = {}) AS present",
        table.name(),
        column.name,
        placeholder
    );
    Ok(sql)
}
