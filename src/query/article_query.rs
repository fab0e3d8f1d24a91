use std::collections::HashSet;

use super::error::QueryError;
use super::types::{SortColumn, SortDirection};
use crate::database::query_builder::{SqlResult, SqlValue};

/// Select list and join shared by every query that returns articles
pub(crate) const ARTICLE_SELECT: &str = "SELECT articles.article_id, articles.title, articles.topic, \
     articles.author, articles.body, articles.created_at, articles.votes, \
     COUNT(comments.comment_id) AS comment_count \
     FROM articles LEFT JOIN comments ON comments.article_id = articles.article_id";

/// Parsed `GET /api/articles` query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    pub sort_by: SortColumn,
    pub order: SortDirection,
    pub topic: Option<String>,
}

impl ArticleQuery {
    pub const KEYS: [&'static str; 3] = ["sort_by", "order", "topic"];

    /// Parse raw query pairs. One bad key or value rejects the whole request.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = ArticleQuery::default();
        let mut seen = HashSet::new();

        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            if !Self::KEYS.contains(&key) {
                return Err(QueryError::UnknownKey(key.to_string()));
            }
            if !seen.insert(key.to_string()) {
                return Err(QueryError::DuplicateKey(key.to_string()));
            }
            match key {
                "sort_by" => {
                    query.sort_by = SortColumn::parse(value)
                        .ok_or_else(|| QueryError::InvalidSortColumn(value.to_string()))?;
                }
                "order" => {
                    query.order = SortDirection::parse(value)
                        .ok_or_else(|| QueryError::InvalidOrder(value.to_string()))?;
                }
                _ => query.topic = Some(value.to_string()),
            }
        }

        Ok(query)
    }

    pub fn to_sql(&self) -> SqlResult {
        let mut sql = SqlResult::new(ARTICLE_SELECT);

        if let Some(topic) = &self.topic {
            let placeholder = sql.push_param(SqlValue::Text(topic.clone()));
            sql.query.push_str(&format!(" WHERE articles.topic = {}", placeholder));
        }

        // Article id breaks ties so equal sort keys come back in a stable order
        sql.query.push_str(&format!(
            " GROUP BY articles.article_id ORDER BY articles.\"{}\" {}, articles.article_id ASC",
            self.sort_by.column_name(),
            self.order.to_sql()
        ));

        sql
    }
}
