use std::sync::Arc;

use crate::{
    ClientError, ClientResult,
    model::{ClientUpdate, Item, NewClient},
    store::{ClientStore, StoreOutcome},
};

/// Orchestrates the storage calls behind each client operation.
///
/// This is the only place where a missing item becomes [`ClientError::NotFound`].
/// Storage failures are passed on unchanged and never retried.
#[derive(Clone)]
pub struct ClientService {
    store: Arc<dyn ClientStore>,
}

impl ClientService {
    pub fn new(store: Arc<dyn ClientStore>) -> Self {
        Self { store }
    }

    /// Stores the payload and returns it as stored.
    pub async fn create_client(&self, client: NewClient) -> ClientResult<Item> {
        self.store.put(&client).await?;

        Ok(client.into_item())
    }

    pub async fn get_client(&self, user_sub: &str) -> ClientResult<Item> {
        let outcome = self.store.get(user_sub).await?;

        found(outcome)
    }

    /// Rewrites `clientName` and returns the updated attributes.
    pub async fn update_client(&self, user_sub: &str, update: ClientUpdate) -> ClientResult<Item> {
        let outcome = self.store.update_client_name(user_sub, &update.client_name).await?;

        found(outcome)
    }

    pub async fn delete_client(&self, user_sub: &str) -> ClientResult<()> {
        let outcome = self.store.delete(user_sub).await?;

        found(outcome).map(|_| ())
    }
}

// A lost race on the existence condition reads the same as an item that never existed.
fn found(outcome: StoreOutcome<Item>) -> ClientResult<Item> {
    outcome.found().ok_or_else(ClientError::not_found)
}
