//! Endpoint configuration.
//!
//! One TOML file with four sections, all optional:
//!
//! ```toml
//! [shared]
//! log_level = "info"
//! service_name = "rov-endpoint"
//!
//! [server]
//! bind_address = "0.0.0.0"
//! port = 50000
//! backlog = 5
//! recv_buffer_size = 5242880
//! read_timeout_ms = 2000
//! accept_poll_ms = 50
//!
//! [motors]
//! backend = "gpio"
//!
//! [camera]
//! backend = "command"
//! program = "chdkptp"
//! args = ["-c", "-e"]
//! ```

use rov_common::actuator::config::{CameraConfig, MotorConfig};
use rov_common::config::{ConfigError, ConfigLoader, SharedConfig};
use rov_common::consts::{
    DEFAULT_ACCEPT_POLL_MS, DEFAULT_BACKLOG, DEFAULT_BIND_ADDRESS, DEFAULT_PORT,
    DEFAULT_RECV_BUFFER_SIZE,
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Complete endpoint configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Logging and service identity.
    #[serde(default)]
    pub shared: SharedConfig,
    /// Listening socket.
    #[serde(default)]
    pub server: ServerConfig,
    /// Motor backend.
    #[serde(default)]
    pub motors: MotorConfig,
    /// Camera backend.
    #[serde(default)]
    pub camera: CameraConfig,
}

/// `[server]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address.
    pub bind_address: String,
    /// Listen port; 0 picks an ephemeral port.
    pub port: u16,
    /// Listen backlog.
    pub backlog: i32,
    /// Maximum bytes read per connection.
    pub recv_buffer_size: usize,
    /// Per-connection read timeout; `None` blocks until the client sends.
    pub read_timeout_ms: Option<u64>,
    /// Accept poll interval, bounds shutdown latency.
    pub accept_poll_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            backlog: DEFAULT_BACKLOG,
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
            read_timeout_ms: None,
            accept_poll_ms: DEFAULT_ACCEPT_POLL_MS,
        }
    }
}

impl ServerConfig {
    /// Parsed listen address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.bind_address.parse().map_err(|e| {
            ConfigError::ValidationError(format!(
                "server.bind_address '{}': {}",
                self.bind_address, e
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Read timeout as a `Duration`.
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// Accept poll interval as a `Duration`.
    pub fn accept_poll(&self) -> Duration {
        Duration::from_millis(self.accept_poll_ms)
    }

    /// Validate the server configuration.
    ///
    /// # Validation Rules
    /// 1. `bind_address` is an IP address
    /// 2. `backlog` > 0
    /// 3. `recv_buffer_size` > 0
    /// 4. `accept_poll_ms` > 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        if self.backlog <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "server.backlog must be > 0 (got {})",
                self.backlog
            )));
        }
        if self.recv_buffer_size == 0 {
            return Err(ConfigError::ValidationError(
                "server.recv_buffer_size must be > 0".to_string(),
            ));
        }
        if self.accept_poll_ms == 0 {
            return Err(ConfigError::ValidationError(
                "server.accept_poll_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl EndpointConfig {
    /// Load from `path`, or use defaults when no path is given.
    ///
    /// The loaded configuration is validated.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                info!("Loading configuration from {:?}", path);
                Self::load(path)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.server.validate()?;
        self.motors.validate()?;
        self.camera.validate()?;
        Ok(())
    }
}
