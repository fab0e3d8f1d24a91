use thiserror::Error;

use crate::database::manager::DatabaseError;
use crate::database::schema::Table;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid format for {table}.{column}: {value}")]
    InvalidFormat { table: Table, column: String, value: String },

    #[error("No row in {table} with {column} = {value}")]
    NotFound { table: Table, column: String, value: String },

    #[error("Referenced {table}.{column} does not exist: {value}")]
    InvalidReference { table: Table, column: String, value: String },

    #[error("Unknown column {column} on {table}")]
    UnknownColumn { table: Table, column: String },

    #[error("Value for {table}.{column} cannot be cast to the column type")]
    InvalidValue { table: Table, column: String },

    #[error("Field not accepted here: {0}")]
    UnexpectedField(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Request body has no fields")]
    EmptyBody,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl ValidationError {
    /// A missing row named by the request body is the payload's fault, not the path's
    pub fn as_reference(self) -> Self {
        match self {
            ValidationError::NotFound { table, column, value } => {
                ValidationError::InvalidReference { table, column, value }
            }
            other => other,
        }
    }
}
