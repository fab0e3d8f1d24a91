pub mod article_query;
pub mod error;
pub mod types;

pub use article_query::ArticleQuery;
pub use error::QueryError;
pub use types::{SortColumn, SortDirection};
