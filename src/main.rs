/// finger - a static WebFinger (RFC 7033) server
///
/// Loads resource and URN alias definitions from YAML files, compiles them
/// into an immutable in-memory index, and serves JRD documents over HTTP.
mod api;
mod config;
mod context;
mod error;
mod loader;
mod server;
mod webfingers;

use config::ServerConfig;
use context::AppContext;
use error::FingerResult;
use loader::FingerLoader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> FingerResult<()> {
    // Load configuration
    let config = ServerConfig::from_env()?;
    config.validate()?;

    // Initialize logging
    let default_filter = if config.debug {
        "finger=debug,tower_http=debug"
    } else {
        "finger=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Build the webfinger index before accepting any connections. Any
    // definition error is fatal here; a half-built index is never served.
    let webfingers = FingerLoader::new(&config).load()?;
    info!("loaded {} webfingers", webfingers.len());

    // Start the server
    let ctx = AppContext::new(config, webfingers);
    server::serve(ctx).await
}
