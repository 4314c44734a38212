/// API routes and handlers
pub mod extract;
pub mod photos;

use crate::context::AppContext;
use axum::Router;

/// Build API routes
pub fn routes() -> Router<AppContext> {
    Router::new().merge(photos::routes())
}
