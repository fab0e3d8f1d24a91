pub mod manager;
pub mod models;
pub mod query_builder;
pub mod repository;
pub mod schema;
pub mod seed;
pub mod store;

pub use manager::{DatabaseError, PgStore};
pub use query_builder::{SqlResult, SqlValue};
pub use schema::{ColumnDef, ColumnKind, Table};
pub use store::Store;
