mod clients;
mod loader;
mod server;
mod storage;

use std::path::Path;

use serde::Deserialize;

pub use clients::ClientsConfig;
pub use server::{AuthConfig, HealthConfig, ServerConfig};
pub use storage::{DynamoDbConfig, StorageConfig};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub clients: ClientsConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Reads, parses and validates the configuration file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
        loader::load(path)
    }

    /// Reads and parses the configuration file without validating it.
    ///
    /// Callers applying overrides on top must run [`Config::validate`] afterwards.
    pub fn read<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
        loader::read(path)
    }
}
