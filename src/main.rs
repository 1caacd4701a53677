//! ircserv - IRC-style chat server.
//!
//! Usage: `ircserv <port> <password> [config.toml]`

use anyhow::{Context, bail};
use ircserv::{Config, Server};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: ircserv <port> <password> [config.toml]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = load_config(std::env::args().skip(1).collect()).inspect_err(|e| {
        error!(error = %e, "Invalid startup arguments");
    })?;

    info!(
        server = %config.server.name,
        network = %config.server.network,
        address = %config.listen.address,
        "Starting ircserv"
    );

    let server = Server::bind(config).await.inspect_err(|e| {
        error!(error = %e, "Failed to start server");
    })?;
    server.run().await
}

/// Build the configuration from `<port> <password> [config.toml]`.
fn load_config(args: Vec<String>) -> anyhow::Result<Config> {
    let (port, password, path) = match args.as_slice() {
        [port, password] => (port, password, None),
        [port, password, path] => (port, password, Some(path)),
        _ => bail!(USAGE),
    };
    let port: u16 = port
        .parse()
        .with_context(|| format!("invalid port {:?}; {}", port, USAGE))?;

    let mut config = match path {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path))?,
        None => Config::default(),
    };
    config.server.password = password.clone();
    config.listen.address.set_port(port);
    Ok(config)
}
