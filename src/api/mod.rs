/// API routes and handlers
pub mod health;
pub mod webfinger;

use crate::context::AppContext;
use axum::Router;

/// Build API routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .merge(webfinger::routes())
        .merge(health::routes())
}
