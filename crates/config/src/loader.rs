use std::path::Path;

use anyhow::{Context, bail};
use indoc::indoc;
use secrecy::ExposeSecret;

use crate::{Config, StorageConfig};

pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let config = read(path)?;
    validate(&config)?;

    Ok(config)
}

pub fn read<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration file {}", path.display()))?;

    let config = toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;

    Ok(config)
}

pub(crate) fn validate(config: &Config) -> anyhow::Result<()> {
    validate_storage(&config.storage)?;
    validate_paths(config)?;

    if let Some(auth) = &config.server.auth
        && auth.jwt_secret.expose_secret().is_empty()
    {
        bail!("server.auth.jwt_secret must not be empty");
    }

    Ok(())
}

fn validate_storage(storage: &StorageConfig) -> anyhow::Result<()> {
    let StorageConfig::DynamoDb(dynamodb) = storage else {
        return Ok(());
    };

    if dynamodb.table_name.trim().is_empty() {
        bail!(indoc! {r#"
            The DynamoDB table name must not be empty. Set it in the configuration file:

              [storage]
              type = "dynamodb"
              table_name = "clients"

            or pass it with --table-name / TABLE_NAME.
        "#});
    }

    if dynamodb.access_key_id.is_some() != dynamodb.secret_access_key.is_some() {
        bail!("storage.access_key_id and storage.secret_access_key must be set together");
    }

    Ok(())
}

fn validate_paths(config: &Config) -> anyhow::Result<()> {
    let clients_path = &config.clients.path;

    if !clients_path.starts_with('/') || clients_path == "/" {
        bail!("clients.path must start with '/' and must not be the root path, got '{clients_path}'");
    }

    let health = &config.server.health;

    if health.enabled {
        if !health.path.starts_with('/') {
            bail!("server.health.path must start with '/', got '{}'", health.path);
        }

        if &health.path == clients_path {
            bail!("server.health.path and clients.path cannot use the same path ({clients_path})");
        }
    }

    Ok(())
}

impl Config {
    /// Checks the invariants the parser cannot express. Run again after applying overrides.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate(self)
    }
}
