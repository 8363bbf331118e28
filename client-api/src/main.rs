use args::Args;
use clap::Parser;
use server::ServeConfig;
use tokio_util::sync::CancellationToken;

mod args;
mod shutdown;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = args.config()?;
    let listen_address = args.listen_address(&config);

    let shutdown_signal = CancellationToken::new();

    shutdown::on_ctrl_c(shutdown_signal.clone());

    server::serve(ServeConfig {
        listen_address,
        config,
        shutdown_signal,
        log_filter: args.log_filter,
    })
    .await?;

    Ok(())
}
