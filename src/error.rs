// HTTP API Error Types
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::database::manager::DatabaseError;
use crate::query::QueryError;
use crate::validation::ValidationError;

pub const INVALID_PARAMETRIC_FORMAT: &str = "400: bad request - invalid parametric endpoint format";
pub const INVALID_DATA_FORMAT: &str = "400: bad request - invalid data format";
pub const MISSING_REQUIRED_FIELD: &str = "400: bad request - missing required field";
pub const INVALID_REFERENCE: &str = "400: bad request - referenced value does not exist";
pub const INVALID_QUERY: &str = "400: bad request - invalid query";
pub const PARAMETRIC_NOT_FOUND: &str = "404: parametric endpoint not found";
pub const PATH_NOT_FOUND: &str = "404: path not found";
pub const SERVER_ERROR: &str = "500: server error";

/// Every failure a request can end in. The status code and client message
/// depend only on the variant.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request: malformed identifier, body or query string
    Format(&'static str),

    // 404 Not Found: well-formed identifier with no row behind it
    NotFound(&'static str),

    // 404 Not Found: no route for this verb and path
    UnknownRoute,

    // 500 Internal Server Error: detail is logged, never sent
    Server(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Format(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::UnknownRoute => StatusCode::NOT_FOUND,
            ApiError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::Format(msg) | ApiError::NotFound(msg) => *msg,
            ApiError::UnknownRoute => PATH_NOT_FOUND,
            ApiError::Server(_) => SERVER_ERROR,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "message": self.message() })
    }

    pub fn server(detail: impl Into<String>) -> Self {
        ApiError::Server(detail.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidFormat { .. } => ApiError::Format(INVALID_PARAMETRIC_FORMAT),
            ValidationError::NotFound { .. } => ApiError::NotFound(PARAMETRIC_NOT_FOUND),
            ValidationError::InvalidReference { .. } => ApiError::Format(INVALID_REFERENCE),
            ValidationError::MissingField(_) => ApiError::Format(MISSING_REQUIRED_FIELD),
            ValidationError::UnknownColumn { .. }
            | ValidationError::InvalidValue { .. }
            | ValidationError::UnexpectedField(_)
            | ValidationError::NotAnObject
            | ValidationError::EmptyBody => ApiError::Format(INVALID_DATA_FORMAT),
            ValidationError::Database(e) => e.into(),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(_: QueryError) -> Self {
        ApiError::Format(INVALID_QUERY)
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Server(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(_: JsonRejection) -> Self {
        ApiError::Format(INVALID_DATA_FORMAT)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("path rejected: {}", rejection.body_text());
        ApiError::Format(INVALID_PARAMETRIC_FORMAT)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        QueryError::Malformed(rejection.body_text()).into()
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Server(detail) => write!(f, "{}: {}", SERVER_ERROR, detail),
            other => f.write_str(other.message()),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            ApiError::Server(detail) => tracing::error!("request failed: {}", detail),
            other => tracing::debug!(status = %other.status_code(), "request rejected: {}", other.message()),
        }
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
