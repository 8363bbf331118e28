//! In-memory client table for development and tests.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::{ClientStore, StoreOutcome, StoreResult};
use crate::model::{CLIENT_NAME, Item, NewClient};

/// Client table held in a concurrent map. Clones share the same table.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: Arc<DashMap<String, Item>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl ClientStore for MemoryStore {
    async fn put(&self, client: &NewClient) -> StoreResult<()> {
        self.items.insert(client.user_sub().to_owned(), client.item().clone());
        Ok(())
    }

    async fn get(&self, user_sub: &str) -> StoreResult<StoreOutcome<Item>> {
        let outcome = match self.items.get(user_sub) {
            Some(entry) => StoreOutcome::Found(entry.value().clone()),
            None => StoreOutcome::Absent,
        };

        Ok(outcome)
    }

    async fn update_client_name(&self, user_sub: &str, client_name: &str) -> StoreResult<StoreOutcome<Item>> {
        let Some(mut entry) = self.items.get_mut(user_sub) else {
            return Ok(StoreOutcome::Absent);
        };

        entry.insert(CLIENT_NAME.to_owned(), Value::String(client_name.to_owned()));

        Ok(StoreOutcome::Found(entry.value().clone()))
    }

    async fn delete(&self, user_sub: &str) -> StoreResult<StoreOutcome<Item>> {
        let outcome = match self.items.remove(user_sub) {
            Some((_, item)) => StoreOutcome::Found(item),
            None => StoreOutcome::Absent,
        };

        Ok(outcome)
    }
}
