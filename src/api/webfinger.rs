/// WebFinger query endpoint
///
/// Serves GET /.well-known/webfinger?resource=<id> as defined by RFC 7033.
use crate::{
    context::AppContext,
    error::{FingerError, FingerResult},
};
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::debug;

/// JRD media type per RFC 7033
const JRD_CONTENT_TYPE: &str = "application/jrd+json";

/// Build webfinger routes
pub fn routes() -> Router<AppContext> {
    Router::new().route("/.well-known/webfinger", get(webfinger))
}

#[derive(Debug, Deserialize)]
pub struct WebFingerParams {
    pub resource: Option<String>,
}

/// /.well-known/webfinger
///
/// Looks up the decoded `resource` parameter against the index by exact
/// string match. No normalization is re-applied at query time; callers
/// must use the canonical form produced at build time.
pub async fn webfinger(
    State(ctx): State<AppContext>,
    Query(params): Query<WebFingerParams>,
) -> FingerResult<Response> {
    let resource = params
        .resource
        .filter(|r| !r.is_empty())
        .ok_or(FingerError::MissingResource)?;

    let finger = match ctx.webfingers.get(&resource) {
        Some(finger) => finger,
        None => {
            debug!(resource = %resource, "resource not found");
            return Err(FingerError::ResourceNotFound);
        }
    };

    // Serialization of a built entry should never fail; surface a 500
    // rather than panicking if it somehow does.
    let body = serde_json::to_vec(finger)
        .map_err(|e| FingerError::Internal(format!("error encoding json: {e}")))?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, JRD_CONTENT_TYPE)
        .body(Body::from(body))
        .map_err(|e| FingerError::Internal(format!("failed to build response: {e}")))?;

    debug!(resource = %resource, "webfinger request successful");

    Ok(response)
}
