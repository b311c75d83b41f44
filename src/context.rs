/// Application context and dependency injection
use crate::{config::ServerConfig, webfingers::WebFingers};
use std::sync::Arc;

/// Shared state handed to every request handler
///
/// The index is built once before the listener starts and is never
/// mutated afterwards, so handlers share it without locking.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub webfingers: Arc<WebFingers>,
}

impl AppContext {
    pub fn new(config: ServerConfig, webfingers: WebFingers) -> Self {
        Self {
            config: Arc::new(config),
            webfingers: Arc::new(webfingers),
        }
    }
}
