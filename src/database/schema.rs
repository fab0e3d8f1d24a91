//! Server-side catalog of the tables and columns the API may touch.
//!
//! Every identifier that ends up in query text comes from here. Callers can
//! only name a column by string and get back a `&'static ColumnDef`, or fail.

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use crate::database::query_builder::SqlValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Topics,
    Users,
    Articles,
    Comments,
}

/// Declared type of a column, reduced to what validation needs to know
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Text,
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn col(name: &'static str, kind: ColumnKind) -> ColumnDef {
    ColumnDef { name, kind }
}

const TOPIC_COLUMNS: &[ColumnDef] = &[
    col("slug", ColumnKind::Text),
    col("description", ColumnKind::Text),
];

const USER_COLUMNS: &[ColumnDef] = &[
    col("username", ColumnKind::Text),
    col("name", ColumnKind::Text),
    col("avatar_url", ColumnKind::Text),
];

const ARTICLE_COLUMNS: &[ColumnDef] = &[
    col("article_id", ColumnKind::Integer),
    col("title", ColumnKind::Text),
    col("topic", ColumnKind::Text),
    col("author", ColumnKind::Text),
    col("body", ColumnKind::Text),
    col("created_at", ColumnKind::Timestamp),
    col("votes", ColumnKind::Integer),
];

const COMMENT_COLUMNS: &[ColumnDef] = &[
    col("comment_id", ColumnKind::Integer),
    col("article_id", ColumnKind::Integer),
    col("author", ColumnKind::Text),
    col("body", ColumnKind::Text),
    col("votes", ColumnKind::Integer),
    col("created_at", ColumnKind::Timestamp),
];

impl Table {
    /// Dependency order: referenced tables come before the tables that reference them
    pub const ALL: [Table; 4] = [Table::Topics, Table::Users, Table::Articles, Table::Comments];

    pub fn name(self) -> &'static str {
        match self {
            Table::Topics => "topics",
            Table::Users => "users",
            Table::Articles => "articles",
            Table::Comments => "comments",
        }
    }

    pub fn columns(self) -> &'static [ColumnDef] {
        match self {
            Table::Topics => TOPIC_COLUMNS,
            Table::Users => USER_COLUMNS,
            Table::Articles => ARTICLE_COLUMNS,
            Table::Comments => COMMENT_COLUMNS,
        }
    }

    pub fn column(self, name: &str) -> Option<&'static ColumnDef> {
        self.columns().iter().find(|c| c.name == name)
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl ColumnKind {
    /// Syntactic check for a value arriving as text, e.g. a path segment
    pub fn accepts_text(self, value: &str) -> bool {
        match self {
            ColumnKind::Integer => !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()),
            ColumnKind::Text => true,
            ColumnKind::Timestamp => parse_timestamp(value).is_some(),
        }
    }

    /// Typed value for binding. `None` when the text is well-formed but cannot
    /// be held by the column, e.g. digits beyond the INT range.
    pub fn parse_text(self, value: &str) -> Option<SqlValue> {
        if !self.accepts_text(value) {
            return None;
        }
        match self {
            ColumnKind::Integer => value.parse::<i32>().ok().map(SqlValue::Int),
            ColumnKind::Text => Some(SqlValue::Text(value.to_string())),
            ColumnKind::Timestamp => parse_timestamp(value).map(SqlValue::Timestamp),
        }
    }

    /// Whether a JSON body value can be cast to this column's type
    pub fn cast_json(self, value: &Value) -> Option<SqlValue> {
        match (self, value) {
            (ColumnKind::Integer, Value::Number(n)) => n
                .as_i64()
                .and_then(|i| i32::try_from(i).ok())
                .map(SqlValue::Int),
            (ColumnKind::Integer, Value::String(s)) => s.trim().parse::<i32>().ok().map(SqlValue::Int),
            (ColumnKind::Text, Value::String(s)) => Some(SqlValue::Text(s.clone())),
            (ColumnKind::Timestamp, Value::String(s)) => parse_timestamp(s).map(SqlValue::Timestamp),
            _ => None,
        }
    }
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}
