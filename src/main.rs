use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use vocab_lib::config::AppConfig;
use vocab_lib::server::{generate_token, start_server};
use vocab_lib::AppState;

#[derive(Parser)]
#[command(name = "vocab-server", about = "IELTS vocabulary tracker HTTP API", version)]
struct Args {
    /// Config file (default: <config dir>/ielts-vocab/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data directory, overriding the config file
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref()).context("Failed to load config")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(dir) = args.data_dir {
        config.storage.data_dir = Some(dir);
    }
    config.validate()?;

    let data_dir = config.data_dir()?;
    let token = match config.server.token.clone() {
        Some(token) => token,
        None => {
            let token = generate_token();
            log::info!("No token configured, generated access token: {}", token);
            token
        }
    };

    let state = AppState::new(data_dir, &config, token).context("Failed to open data directory")?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.server.host, config.server.port))?;

    let handle = start_server(Arc::new(state), addr)
        .await
        .map_err(|e| anyhow!("Failed to start server: {}", e))?;
    println!("Listening on {}", handle.base_url());

    tokio::signal::ctrl_c().await.context("Failed to wait for Ctrl-C")?;
    handle.shutdown().await;
    Ok(())
}
