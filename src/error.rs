/// Unified error types for the finger server
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Main error type
///
/// Build-time variants are fatal in `main` before the listener binds;
/// request-time variants convert to HTTP responses per request.
#[derive(Error, Debug)]
pub enum FingerError {
    /// A resource key is neither an email-derived account nor an absolute URI
    #[error("invalid resource subject ({0})")]
    InvalidSubject(String),

    /// An alias table value is not a valid absolute URI
    #[error("invalid URN alias value for {0}")]
    InvalidAliasUri(String),

    /// Configuration errors
    #[error("invalid config: {0}")]
    Config(String),

    /// Definition file read errors
    #[error("error reading definition file: {0}")]
    Io(#[from] std::io::Error),

    /// Definition file parse errors
    #[error("error parsing definition file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Missing or empty `resource` query parameter
    #[error("no resource provided")]
    MissingResource,

    /// Subject absent from the index
    #[error("resource not found")]
    ResourceNotFound,

    /// Internal server errors
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convert FingerError to an HTTP response
impl IntoResponse for FingerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            FingerError::MissingResource => (StatusCode::BAD_REQUEST, "No resource provided"),
            FingerError::ResourceNotFound => (StatusCode::NOT_FOUND, "Resource not found"),
            // Don't leak details
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };

        (status, message).into_response()
    }
}

/// Result type alias for finger operations
pub type FingerResult<T> = Result<T, FingerError>;
