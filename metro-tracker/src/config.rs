//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default webhook timeout in seconds.
const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;

/// Invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on (`METRO_BIND_ADDR`)
    pub bind_addr: SocketAddr,
    /// Topology JSON to load instead of the embedded one (`METRO_TOPOLOGY_PATH`)
    pub topology_path: Option<PathBuf>,
    /// Where to POST alerts (`METRO_WEBHOOK_URL`)
    pub webhook_url: Option<String>,
    /// Webhook request timeout (`METRO_WEBHOOK_TIMEOUT_SECS`)
    pub webhook_timeout_secs: u64,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or empty variables take
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = match get("METRO_BIND_ADDR") {
            Some(value) => parse("METRO_BIND_ADDR", value)?,
            None => parse("METRO_BIND_ADDR", DEFAULT_BIND_ADDR.to_string())?,
        };

        let webhook_timeout_secs = match get("METRO_WEBHOOK_TIMEOUT_SECS") {
            Some(value) => parse("METRO_WEBHOOK_TIMEOUT_SECS", value)?,
            None => DEFAULT_WEBHOOK_TIMEOUT_SECS,
        };

        Ok(Self {
            bind_addr,
            topology_path: get("METRO_TOPOLOGY_PATH").map(PathBuf::from),
            webhook_url: get("METRO_WEBHOOK_URL"),
            webhook_timeout_secs,
        })
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
