//! # alsym-cli
//!
//! Symbol-package downloader CLI for AL projects.
//!
//! This is the main entry point for the alsym tool. It handles command
//! parsing, sets up logging, and dispatches to the command handlers.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use alsym_core::error::CoreResult;

mod commands;
mod output;

use commands::CommandContext;

/// Download AL symbol packages for an app and its transitive dependencies
#[derive(Parser)]
#[command(name = "alsym", version, about = "AL symbol-package downloader")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve and download symbol packages for an app
    Download {
        /// Directory containing app.json (defaults to the current directory)
        #[arg(value_name = "APP_DIR")]
        app_dir: Option<PathBuf>,
        /// Feed URL, highest priority first (repeatable)
        #[arg(long = "feed", value_name = "URL")]
        feeds: Vec<String>,
        /// Override the cache root directory
        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,
    },
    /// Show the lock-file from the last successful run
    ShowLock {
        /// Directory containing app.json (defaults to the current directory)
        #[arg(value_name = "APP_DIR")]
        app_dir: Option<PathBuf>,
        /// Override the cache root directory
        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,
    },
    /// Remove cached symbol packages
    Clean {
        /// Directory containing app.json (defaults to the current directory)
        #[arg(value_name = "APP_DIR")]
        app_dir: Option<PathBuf>,
        /// Remove the whole cache root, not just this app's directory
        #[arg(long)]
        all: bool,
        /// Override the cache root directory
        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    info!("Starting alsym v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_cli(cli) {
        let output = output::OutputHandler::new();
        output.error(&e.to_string());
        if let Some(suggestion) = e.suggestion() {
            output.info(suggestion);
        }
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> CoreResult<()> {
    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        alsym_core::error::AlsymError::io("Failed to create async runtime".to_string(), e)
    })?;

    rt.block_on(async {
        let ctx = CommandContext::new()?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "alsym={level},alsym_core={level},alsym_feed={level},alsym_cache={level},alsym_resolver={level}"
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
