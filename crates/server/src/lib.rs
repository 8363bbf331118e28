mod auth;
mod error;
mod fallback;
mod health;
mod logger;

use std::net::SocketAddr;

use auth::AuthLayer;
use axum::{Router, routing::get};
use config::{Config, StorageConfig};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::catch_panic::CatchPanicLayer;

pub use error::Error;

pub(crate) type Result<T> = std::result::Result<T, error::Error>;

pub struct ServeConfig {
    pub listen_address: SocketAddr,
    pub config: Config,
    /// Cancelling this token starts a graceful shutdown.
    pub shutdown_signal: CancellationToken,
    /// A filter like "info" or "server=debug,clients=debug".
    pub log_filter: String,
}

pub async fn serve(
    ServeConfig {
        listen_address,
        config,
        shutdown_signal,
        log_filter,
    }: ServeConfig,
) -> crate::Result<()> {
    logger::init(&log_filter);

    let app = router(&config).await?;

    let listener = TcpListener::bind(listen_address).await.map_err(Error::Bind)?;

    log::info!("Client endpoints available at: http://{listen_address}{}", config.clients.path);

    if config.server.health.enabled {
        log::info!("Health endpoint available at: http://{listen_address}{}", config.server.health.path);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal.cancelled_owned())
        .await
        .map_err(Error::Server)?;

    log::info!("Server stopped");

    Ok(())
}

/// Builds the full routing table.
///
/// `POST {clients.path}` goes straight to validation, while the routes addressing a
/// single client sit behind the authentication gate. Anything else is a 404, and a
/// panic anywhere below becomes a 500.
pub async fn router(config: &Config) -> crate::Result<Router> {
    let service = clients::service(&config.storage)
        .await
        .map_err(|e| Error::Storage(e.into()))?;

    if let StorageConfig::Memory = config.storage {
        log::warn!("Using in-memory client storage, data will be lost when the process exits");
    }

    if !config.server.uses_auth() {
        log::warn!("No [server.auth] configured, client routes are not authenticated");
    }

    let auth = AuthLayer::new(config.server.auth.clone());

    let client_routes = Router::new()
        .merge(clients::protected_routes(service.clone()).route_layer(auth))
        .merge(clients::public_routes(service));

    let mut app = Router::new().nest(&config.clients.path, client_routes);

    if config.server.health.enabled {
        app = app.route(&config.server.health.path, get(health::health));
    }

    Ok(app
        .fallback(fallback::not_found)
        .method_not_allowed_fallback(fallback::not_found)
        .layer(CatchPanicLayer::custom(fallback::panic)))
}

#[cfg(test)]
mod tests;
