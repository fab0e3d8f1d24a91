use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unrecognized query parameter: {0}")]
    UnknownKey(String),

    #[error("Query parameter given more than once: {0}")]
    DuplicateKey(String),

    #[error("Invalid sort column: {0}")]
    InvalidSortColumn(String),

    #[error("Invalid sort order: {0}")]
    InvalidOrder(String),

    #[error("Malformed query string: {0}")]
    Malformed(String),
}
