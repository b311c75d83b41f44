/// Liveness endpoint
///
/// Returns 200 with an empty body once the listener accepts connections.
/// Container healthchecks probe this path.
use crate::context::AppContext;
use axum::{http::StatusCode, routing::get, Router};

/// Build health check routes
pub fn routes() -> Router<AppContext> {
    Router::new().route("/healthz", get(healthz))
}

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
