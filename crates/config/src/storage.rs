//! Storage backend selection.

use secrecy::SecretString;
use serde::Deserialize;

/// The key-value store holding the client table.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Amazon DynamoDB, or anything speaking its API.
    #[serde(rename = "dynamodb")]
    DynamoDb(DynamoDbConfig),
    /// Process-local map. Data does not survive a restart.
    Memory,
}

impl StorageConfig {
    /// The table name, for backends that have one.
    pub fn table_name(&self) -> Option<&str> {
        match self {
            StorageConfig::DynamoDb(config) => Some(&config.table_name),
            StorageConfig::Memory => None,
        }
    }

    /// Replaces the table name of a DynamoDB backend. No-op for the memory backend.
    pub fn set_table_name(&mut self, table_name: String) {
        if let StorageConfig::DynamoDb(config) = self {
            config.table_name = table_name;
        }
    }
}

/// DynamoDB connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DynamoDbConfig {
    /// The table holding one item per client, keyed by `userSub`.
    ///
    /// May be left out of the file when it is passed on the command line.
    #[serde(default)]
    pub table_name: String,

    /// AWS region (optional - uses the environment chain if not provided).
    #[serde(default)]
    pub region: Option<String>,

    /// Custom endpoint URL (optional - for local DynamoDB or VPC endpoints).
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// AWS Access Key ID (optional - uses credential chain if not provided).
    #[serde(default)]
    pub access_key_id: Option<SecretString>,

    /// AWS Secret Access Key (required if access_key_id is provided).
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,

    /// AWS Session Token (optional - for temporary credentials).
    #[serde(default)]
    pub session_token: Option<SecretString>,

    /// AWS Profile name (optional - uses default profile if not specified).
    #[serde(default)]
    pub profile: Option<String>,
}
