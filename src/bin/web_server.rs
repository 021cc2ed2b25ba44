//! # Web Server Binary Entry Point
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin web_server -- --config config/server.toml
//! cargo run --bin web_server -- --address 0.0.0.0:8080
//! ```
//!
//! Without `--config` the built-in defaults are used.

use clap::Parser;
use log::info;

use lsb_stego::common::logging::init_logger;
use lsb_stego::server::routes;
use lsb_stego::server::ServerConfig;

/// Command-line arguments for the web server binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the server configuration file (TOML format)
    ///
    /// Example: config/server.toml
    #[arg(short, long)]
    config: Option<String>,

    /// Listen address, overrides `server.address` from the config file
    #[arg(short, long)]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path);
            ServerConfig::from_file(path)?
        }
        None => ServerConfig::default(),
    };
    if let Some(address) = args.address {
        config.server.address = address;
    }

    routes::run(config).await
}
