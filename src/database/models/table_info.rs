use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One entry of the `GET /api` diagnostic listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TableInfo {
    pub schemaname: String,
    pub tablename: String,
}
