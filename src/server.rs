/// HTTP server setup, routing and lifecycle
use crate::{
    context::AppContext,
    error::{FingerError, FingerResult},
};
use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use std::any::Any;
use std::time::Duration;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

/// Backstop against hung handlers, not a performance bound
const REQUEST_TIMEOUT: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Build the main application router
///
/// Returns Router<()> because state is already provided.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(crate::api::routes())
        .with_state(ctx)
        .layer(cors)
        // Contain handler panics to the request that caused them
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
}

/// Convert a recovered handler panic into a 500 response
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(panic = %detail, "request handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

/// Start the HTTP server
///
/// Binds the listener, serves until the shutdown signal fires, then drains
/// in-flight requests before returning.
pub async fn serve(ctx: AppContext) -> FingerResult<()> {
    let addr = ctx.config.addr();
    let app = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| FingerError::Internal(format!("failed to bind to {addr}: {e}")))?;

    info!(addr = %addr, "starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| FingerError::Internal(format!("server error: {e}")))?;

    info!("server shutdown complete");

    Ok(())
}

/// Resolve on the first interrupt; a second interrupt force-quits
///
/// The drain that follows must not be aborted by the signal that started
/// it, so escalation happens in a detached task.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("received interrupt, shutting down (press Ctrl+C again to force quit)");
        }
        _ = terminate => {
            info!("received SIGTERM, shutting down");
        }
    }

    tokio::spawn(async {
        if signal::ctrl_c().await.is_ok() {
            eprintln!("force quit");
            std::process::exit(1);
        }
    });
}
