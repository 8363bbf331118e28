//! The client entity: validation, storage, orchestration and the HTTP handlers.
//!
//! Requests flow through [`validation`] into [`ClientService`], which talks to a
//! [`ClientStore`]. Every outcome is turned into a wire response exactly once, by
//! the [`IntoResponse`](axum::response::IntoResponse) impl of [`ClientError`] or
//! by the success envelopes in [`envelope`].

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

pub mod envelope;
mod error;
mod handler;
mod model;
mod service;
pub mod store;
pub mod validation;

pub use error::{ClientError, ClientResult, NOT_FOUND_MESSAGE};
pub use model::{CLIENT_NAME, ClientUpdate, Item, NewClient, USER_SUB};
pub use service::ClientService;
pub use store::{ClientStore, StoreError, StoreOutcome, StoreResult};

/// Builds the client service on top of the configured storage backend.
pub async fn service(config: &config::StorageConfig) -> anyhow::Result<Arc<ClientService>> {
    let store = store::from_config(config).await?;

    Ok(Arc::new(ClientService::new(store)))
}

/// Routes reachable without authentication: `POST /`.
pub fn public_routes(service: Arc<ClientService>) -> Router {
    Router::new()
        .route("/", post(handler::create_client).fallback(handler::unsupported_method))
        .with_state(service)
}

/// Routes addressing a single client: `GET|PUT|DELETE /{user_sub}`.
///
/// The caller is expected to put its authentication gate in front of these.
pub fn protected_routes(service: Arc<ClientService>) -> Router {
    Router::new()
        .route(
            "/{user_sub}",
            get(handler::get_client)
                .put(handler::update_client)
                .delete(handler::delete_client)
                .fallback(handler::unsupported_method),
        )
        .with_state(service)
}
