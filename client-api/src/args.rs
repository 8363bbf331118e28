use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use clap::{Parser, builder::NonEmptyStringValueParser};
use config::Config;

const DEFAULT_LISTEN_ADDRESS: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000);

/// HTTP API for client records.
#[derive(Debug, Parser)]
#[command(name = "client-api", version)]
pub struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "CLIENT_API_CONFIG", default_value = "./client-api.toml")]
    pub config: PathBuf,

    /// Address to listen on. Overrides `server.listen_address`.
    #[arg(short, long, env = "CLIENT_API_LISTEN_ADDRESS")]
    pub listen_address: Option<SocketAddr>,

    /// Storage table name. Overrides `storage.table_name`.
    #[arg(long, env = "TABLE_NAME", value_parser = NonEmptyStringValueParser::new())]
    pub table_name: Option<String>,

    /// Log filter, e.g. "info" or "server=debug,clients=debug".
    #[arg(long = "log", env = "CLIENT_API_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Args {
    /// Loads the configuration file and applies the command line overrides on top.
    pub fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::read(&self.config)?;

        if let Some(table_name) = &self.table_name {
            config.storage.set_table_name(table_name.clone());
        }

        config.validate()?;

        Ok(config)
    }

    /// Command line first, then the configuration file, then `127.0.0.1:3000`.
    pub fn listen_address(&self, config: &Config) -> SocketAddr {
        self.listen_address
            .or(config.server.listen_address)
            .unwrap_or(DEFAULT_LISTEN_ADDRESS)
    }
}
