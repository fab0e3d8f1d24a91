//! Request validation that runs before any lookup or write.
//!
//! Checks run in a fixed order for a request: format, then existence, then
//! body shape, then existence of rows the body refers to. A value that is not
//! even the right shape never reaches the database.

pub mod body;
pub mod error;
pub mod exists;
pub mod format;

pub use body::{body_fields, validate_body_shape, ValidatedBody};
pub use error::ValidationError;
pub use exists::validate_exists;
pub use format::validate_format;
