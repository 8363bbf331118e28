use std::{future::Future, io};

use tokio_util::sync::CancellationToken;

/// Cancels `shutdown_signal` once Ctrl-C is pressed.
pub fn on_ctrl_c(shutdown_signal: CancellationToken) {
    tokio::spawn(cancel_on(tokio::signal::ctrl_c(), shutdown_signal));
}

/// Cancels the token when `signal` fires. If the signal handler could not be
/// installed the server keeps running, it just cannot be stopped with the signal.
async fn cancel_on(signal: impl Future<Output = io::Result<()>>, shutdown_signal: CancellationToken) {
    match signal.await {
        Ok(()) => {
            log::info!("Received Ctrl-C, shutting down");
            shutdown_signal.cancel();
        }
        Err(e) => log::error!("Failed to listen for Ctrl-C, graceful shutdown is unavailable: {e}"),
    }
}
