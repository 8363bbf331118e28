//! The storage adapter.
//!
//! A [`ClientStore`] performs the four key-value operations against the client
//! table. Expected outcomes (the item, no item, a failed write condition) come
//! back as a [`StoreOutcome`]; only infrastructure failures are errors.

mod dynamodb;
mod memory;

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use config::StorageConfig;
use thiserror::Error;

use crate::model::{Item, NewClient};

pub use dynamodb::DynamoDbStore;
pub use memory::MemoryStore;

/// A boxed error type for source chain tracking.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type StoreResult<T> = Result<T, StoreError>;

/// What a storage operation found at the addressed key.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOutcome<T> {
    /// The operation hit an existing item.
    Found(T),
    /// No item exists at the key.
    Absent,
    /// The store refused a conditional write because its condition did not hold.
    Conflict,
}

impl<T> StoreOutcome<T> {
    /// The item, if one was found. Absent and conflict both yield `None`.
    pub fn found(self) -> Option<T> {
        match self {
            StoreOutcome::Found(value) => Some(value),
            StoreOutcome::Absent | StoreOutcome::Conflict => None,
        }
    }
}

/// The storage operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Put,
    Get,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Put => "put",
            Operation::Get => "get",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An infrastructure failure: transport, timeout, throttling, or anything else the
/// store did not express as an outcome.
#[derive(Debug, Error)]
#[error("storage {operation} failed: {source}")]
pub struct StoreError {
    operation: Operation,
    #[source]
    source: BoxError,
}

impl StoreError {
    pub fn new(operation: Operation, source: impl Into<BoxError>) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }
}

/// Key-value operations on the client table, keyed by `userSub`.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Unconditional upsert of the full payload.
    async fn put(&self, client: &NewClient) -> StoreResult<()>;

    /// The item stored at `user_sub`.
    async fn get(&self, user_sub: &str) -> StoreResult<StoreOutcome<Item>>;

    /// Rewrites `clientName` of an existing item and returns all of its attributes afterwards.
    async fn update_client_name(&self, user_sub: &str, client_name: &str) -> StoreResult<StoreOutcome<Item>>;

    /// Removes an existing item and returns the attributes it had.
    async fn delete(&self, user_sub: &str) -> StoreResult<StoreOutcome<Item>>;
}

/// Creates the backend selected in the configuration.
pub async fn from_config(config: &StorageConfig) -> anyhow::Result<Arc<dyn ClientStore>> {
    let store: Arc<dyn ClientStore> = match config {
        StorageConfig::DynamoDb(dynamodb) => {
            log::info!("Using DynamoDB table '{}' for client storage", dynamodb.table_name);
            Arc::new(DynamoDbStore::new(dynamodb).await)
        }
        StorageConfig::Memory => Arc::new(MemoryStore::new()),
    };

    Ok(store)
}
