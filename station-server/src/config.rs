//! Server configuration.

use std::net::{AddrParseError, SocketAddr};
use std::path::{Path, PathBuf};

use crate::dataset::Dataset;
use crate::store::LayerSource;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Station store file name inside the data directory.
pub const STATIONS_FILE: &str = "stations.sqlite";
/// Station layer name.
pub const STATIONS_LAYER: &str = "stations";
/// Railway store file name inside the data directory.
pub const LINES_FILE: &str = "railway.sqlite";
/// Railway layer name.
pub const LINES_LAYER: &str = "railway";

/// Environment variable overriding the listen address.
pub const BIND_ENV: &str = "STATION_SERVER_BIND";
/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "STATION_SERVER_DATA_DIR";

/// Errors raised while building the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

/// Configuration for the HTTP server and its backing stores.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Station point layer
    pub stations: LayerSource,
    /// Railway line layer
    pub lines: LayerSource,
}

impl ServerConfig {
    /// Create a config reading both stores from `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            bind_addr: default_bind_addr(),
            stations: LayerSource::new(data_dir.join(STATIONS_FILE), STATIONS_LAYER),
            lines: LayerSource::new(data_dir.join(LINES_FILE), LINES_LAYER),
        }
    }

    /// Set a custom listen address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Read both stores from another directory, keeping layer names.
    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        self.stations.path = data_dir.join(STATIONS_FILE);
        self.lines.path = data_dir.join(LINES_FILE);
        self
    }

    /// Build the config from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup(DATA_DIR_ENV)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let mut config = Self::new(data_dir);

        if let Some(value) = lookup(BIND_ENV).filter(|s| !s.is_empty()) {
            config.bind_addr = value
                .parse()
                .map_err(|source| ConfigError::InvalidBindAddr { value, source })?;
        }

        Ok(config)
    }

    /// The dataset described by this config.
    pub fn dataset(&self) -> Dataset {
        Dataset::new(self.stations.clone(), self.lines.clone())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(default_data_dir())
    }
}

/// `data/` next to the running executable, or `./data` if that can't be found.
pub fn default_data_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("data")
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}
