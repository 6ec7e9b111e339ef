//! repo-sweep command-line entry point.
//!
//! Runs the same listing, emptying and lifecycle handling the Lambda does,
//! against whatever registry the local AWS credentials reach.

mod commands;
mod options;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use sweep_core::{EcrRegistry, SweepConfig};

use options::{CliOptions, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let options = CliOptions::parse();
    init_tracing(options.debug);

    let config = SweepConfig::from_env().context("Failed to load REPO_SWEEP_* configuration")?;
    let config = options.apply(config).context("Invalid options")?;
    let registry = EcrRegistry::from_config(&config).await;

    match options.command {
        Command::List { repository } => commands::list(&registry, &repository).await,
        Command::Empty {
            repository,
            dry_run,
        } => commands::empty(&registry, &repository, dry_run).await,
        Command::Invoke { event } => commands::invoke(registry, &event).await,
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        "repo_sweep=debug,sweep_core=debug"
    } else {
        "repo_sweep=warn,sweep_core=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
