use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;

use quire_gateway::GatewayConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Largest accepted request body, in bytes.
    pub max_body_size: usize,
    /// Take the peer address from `X-Forwarded-For` when present. Only
    /// enable behind a reverse proxy that sets the header; otherwise any
    /// client can choose its recorded `peer`.
    pub trust_forwarded_for: bool,
    /// Bearer token → user name. Empty disables authentication.
    pub tokens: HashMap<String, String>,
    pub gateway: GatewayConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3050)),
            max_body_size: 10 * 1024 * 1024,
            trust_forwarded_for: false,
            tokens: HashMap::new(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML configuration; missing keys keep their defaults.
    pub fn from_toml(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ServerError::Config(format!("cannot read {}: {e}", path.as_ref().display()))
        })?;
        Self::from_toml(&text)
    }
}
