use common::config::Validate;
use common::games::connect_four::{DEFAULT_DIMENSION, MIN_DIMENSION};
use serde::Deserialize;
use std::net::SocketAddr;

pub const DEFAULT_CONFIG_PATH: &str = "four_lines_server.yaml";
pub const DEFAULT_LISTEN_ADDRESS: &str = "[::1]:5001";
pub const MAX_DIMENSION: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_address: String,
    pub dimension: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
            dimension: DEFAULT_DIMENSION as u32,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.listen_address
            .parse()
            .map_err(|e| format!("Invalid listen address {}: {}", self.listen_address, e))
    }

    pub fn with_overrides(mut self, listen_address: Option<String>, dimension: Option<u32>) -> Self {
        if let Some(listen_address) = listen_address {
            self.listen_address = listen_address;
        }
        if let Some(dimension) = dimension {
            self.dimension = dimension;
        }
        self
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        let min_dimension = MIN_DIMENSION as u32;
        if self.dimension < min_dimension || self.dimension > MAX_DIMENSION {
            return Err(format!(
                "Board dimension must be between {} and {}, got {}",
                min_dimension, MAX_DIMENSION, self.dimension
            ));
        }
        self.socket_addr()?;
        Ok(())
    }
}
