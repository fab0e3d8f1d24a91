use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub comment_id: i32,
    pub article_id: i32,
    pub author: String,
    pub body: String,
    pub votes: i32,
    pub created_at: NaiveDateTime,
}

/// Validated input for a comment insert; author and article are known to exist
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub article_id: i32,
    pub author: String,
    pub body: String,
}
