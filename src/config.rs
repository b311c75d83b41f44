/// Configuration management for the finger server
use crate::error::{FingerError, FingerResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Default host to listen on
pub const DEFAULT_HOST: &str = "localhost";
/// Default port to listen on
pub const DEFAULT_PORT: u16 = 8080;
/// Default path to the URN alias file
pub const DEFAULT_URN_PATH: &str = "urns.yml";
/// Default path to the webfinger definition file
pub const DEFAULT_FINGER_PATH: &str = "fingers.yml";

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub urn_path: PathBuf,
    pub finger_path: PathBuf,
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            urn_path: PathBuf::from(DEFAULT_URN_PATH),
            finger_path: PathBuf::from(DEFAULT_FINGER_PATH),
            debug: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> FingerResult<Self> {
        dotenv::dotenv().ok();

        // Listen on all interfaces when running inside a container.
        let default_host = if env::var("ENV_DOCKER").as_deref() == Ok("true") {
            "0.0.0.0"
        } else {
            DEFAULT_HOST
        };

        let host = env::var("WF_HOST").unwrap_or_else(|_| default_host.to_string());
        let port = env::var("WF_PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .map_err(|_| FingerError::Config("invalid port number".to_string()))?;

        let urn_path = env::var("WF_URN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_URN_PATH));
        let finger_path = env::var("WF_FINGER_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_FINGER_PATH));

        let debug = env::var("WF_DEBUG")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            urn_path,
            finger_path,
            debug,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> FingerResult<()> {
        if self.host.is_empty() {
            return Err(FingerError::Config("host is empty".to_string()));
        }

        if self.urn_path.as_os_str().is_empty() {
            return Err(FingerError::Config("urn path is empty".to_string()));
        }

        if self.finger_path.as_os_str().is_empty() {
            return Err(FingerError::Config("finger path is empty".to_string()));
        }

        Ok(())
    }

    /// Listen address in host:port form
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether the URN file path is the system default
    pub fn is_default_urn_path(&self) -> bool {
        self.urn_path == Path::new(DEFAULT_URN_PATH)
    }

    /// Whether the finger file path is the system default
    pub fn is_default_finger_path(&self) -> bool {
        self.finger_path == Path::new(DEFAULT_FINGER_PATH)
    }
}
