//! Savings Calculator API server
//!
//! Serves the settings and project endpoints from process memory.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use savings_api::{Server, ServerConfig};
use tracing_subscriber::EnvFilter;

/// Savings Calculator API server
#[derive(Parser, Debug)]
#[command(name = "savings-server")]
#[command(about = "Serve the Savings Calculator API", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "SAVINGS_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long, env = "SAVINGS_HOST")]
    host: Option<String>,

    /// Port to bind
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Start with no projects instead of the demo set
    #[arg(long)]
    no_seed: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long)]
    log_level: Option<String>,

    /// Print the resolved configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<ServerConfig> {
        let mut config = ServerConfig::load(self.config.as_deref())?;
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if self.no_seed {
            config.seed_demo_projects = false;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.resolve_config()?;

    if args.print_config {
        config.validate()?;
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=debug", config.log_level))),
        )
        .init();

    tracing::info!(addr = %config.bind_addr(), "Starting savings-server");

    let server = Server::new(config)?;
    server.run().await?;
    Ok(())
}
