// handlers/mod.rs - one module per resource
//
// Every handler follows the same shape: validate the path, validate the body,
// make one store call, wrap the result under its resource key. Errors bubble
// out as ApiError and are rendered by its IntoResponse impl.

use std::sync::Arc;

use crate::database::store::Store;
use crate::error::ApiError;

pub mod api;
pub mod articles;
pub mod comments;
pub mod params;
pub mod topics;
pub mod users;

pub use api::{health, list_tables};
pub use articles::{get_article, list_articles, patch_article};
pub use comments::{list_comments, post_comment};
pub use topics::list_topics;
pub use users::list_users;

/// Shared by every handler; built once at startup
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

/// Any verb or path the router does not know
pub async fn unknown_route() -> ApiError {
    ApiError::UnknownRoute
}
