//! Server configuration from the environment.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Listen address used when `METRO_ROUTER_ADDR` is unset.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Error reading server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid listen address {value:?}: {source}")]
    InvalidAddr {
        value: String,
        source: AddrParseError,
    },
}

/// Where to listen and which network to serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,

    /// Dataset to load; the bundled Medellín network when `None`.
    pub network_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Read `METRO_ROUTER_ADDR` and `METRO_ROUTER_NETWORK`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup("METRO_ROUTER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = raw
            .parse()
            .map_err(|source| ConfigError::InvalidAddr { value: raw, source })?;

        let network_path = lookup("METRO_ROUTER_NETWORK")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self { addr, network_path })
    }
}
