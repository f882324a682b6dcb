//! portal-bff - backend-for-frontend for a developer portal
//!
//! Serves flat, aggregated views of platform control-plane resources
//! (projects, components, environments, data planes, builds) to the portal
//! frontend.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use portal_bff::cli::{ConfigSubcommand, display_version, handle_config_command, init_logging};
use portal_bff::config::ConfigLoader;
use std::path::PathBuf;

/// portal-bff - backend-for-frontend for a developer portal
#[derive(Parser, Debug)]
#[command(name = "portal-bff")]
#[command(about = "Backend-for-frontend for a developer portal", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Configuration file (defaults to config.yaml in the config directory)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Command to run (defaults to serve)
    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Address to listen on, overriding server.bindAddress
        #[arg(long)]
        bind: Option<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let bind = match args.command {
        Some(Command::Config { subcommand }) => {
            return handle_config_command(subcommand, args.config.as_deref());
        }
        Some(Command::Version) => {
            display_version();
            return Ok(());
        }
        Some(Command::Serve { bind }) => bind,
        None => None,
    };

    let mut config =
        ConfigLoader::validate(args.config.as_deref()).context("Invalid configuration")?;
    if let Some(bind) = bind {
        config.server.bind_address = bind;
    }

    init_logging(&config.logger.level, args.debug, config.logger.file.as_deref())?;
    if let Some(path) = &config.logger.file {
        eprintln!("Logs written to: {}", path.display());
    }
    tracing::debug!(
        "Configuration loaded: platform={}, batchSize={}",
        config.platform.base_url,
        config.aggregation.batch_size
    );

    portal_bff::server::serve(&config).await
}
