//! facekit CLI - command-line client for remote face recognition APIs.
//!
//! Detects faces, reads attributes, searches albums and manages albums
//! through the configured face provider. Results go to stdout as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Detect faces in a remote or local image
//! facekit detect https://example.com/team.jpg
//! facekit detect ./photos/me.jpg
//!
//! # Search an album
//! facekit search ./photos/me.jpg --album 3f8e...
//!
//! # Manage albums
//! facekit create-album "Team" --face f1 --face f2
//! facekit albums
//!
//! # View configuration
//! facekit config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// facekit - client for remote face recognition APIs.
#[derive(Parser, Debug)]
#[command(name = "facekit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Provider to use instead of the configured default
    #[arg(long, global = true, env = "FACEKIT_PROVIDER")]
    provider: Option<String>,

    /// Config file to load instead of the default location
    #[arg(long, global = true, env = "FACEKIT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Provider(cli::ProviderCommand),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match cli::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `facekit config path`."
            );
            facekit_core::Config::default()
        }
    };
    logging::init(&config.logging, cli.verbose, cli.json_logs);

    tracing::debug!("facekit v{}", facekit_core::VERSION);

    match cli.command {
        Commands::Config(args) => cli::config::execute(args, cli.config.as_deref()).await,
        Commands::Provider(command) => {
            let manager = facekit_core::FaceManager::new(config);
            let provider = manager.provider(cli.provider.as_deref())?;
            tracing::debug!("Using face provider '{}'", provider.name());
            cli::run(provider.as_ref(), command).await
        }
    }
}
