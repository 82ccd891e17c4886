//! Server configuration.

use camino::Utf8PathBuf;
use clap::Parser;
use std::net::SocketAddr;
use thiserror::Error;

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Default snapshot file.
pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Taskboard server configuration, read from flags or the environment.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "taskboard")]
#[command(about = "Task tracking HTTP backend", long_about = None)]
#[command(version)]
pub struct ServerConfig {
    /// Socket address the HTTP server listens on.
    #[arg(long, env = "TASKBOARD_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,

    /// JSON file holding the board snapshot.
    #[arg(long, env = "TASKBOARD_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: Utf8PathBuf,

    /// Tracing filter directives; `RUST_LOG` is used when absent.
    #[arg(long, env = "TASKBOARD_LOG")]
    pub log_filter: Option<String>,
}

/// Errors returned while interpreting configuration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The bind address is not a socket address.
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),
}

impl ServerConfig {
    /// Parses the configured bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBindAddress`] when the value does not
    /// parse as `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(self.bind.clone()))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_owned(),
            data_file: Utf8PathBuf::from(DEFAULT_DATA_FILE),
            log_filter: None,
        }
    }
}
