//! Command-line options for repo-sweep.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sweep_core::{SweepConfig, SweepError};

/// Command-line arguments for repo-sweep.
#[derive(Parser, Debug)]
#[command(author, version, about = "List and empty ECR repositories ahead of stack deletion")]
pub struct CliOptions {
    /// AWS region of the registry
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Registry endpoint override, e.g. an emulator
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    /// Account id owning the registry
    #[arg(long, global = true)]
    pub registry_id: Option<String>,

    /// Images requested per ListImages page
    #[arg(long, global = true)]
    pub page_size: Option<i32>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List every image in a repository
    List {
        /// Repository name
        repository: String,
    },

    /// Delete every image in a repository
    Empty {
        /// Repository name
        repository: String,

        /// Only report what would be deleted
        #[arg(long)]
        dry_run: bool,
    },

    /// Run a custom resource event file through the lifecycle handler
    Invoke {
        /// Path to the event JSON
        #[arg(short, long)]
        event: PathBuf,
    },
}

impl CliOptions {
    /// Overlay command-line flags on top of environment configuration.
    pub fn apply(&self, mut config: SweepConfig) -> Result<SweepConfig, SweepError> {
        if let Some(region) = &self.region {
            config.region = Some(region.clone());
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            config.endpoint_url = Some(endpoint_url.clone());
        }
        if let Some(registry_id) = &self.registry_id {
            config.registry_id = Some(registry_id.clone());
        }
        if self.page_size.is_some() {
            config.page_size = self.page_size;
        }

        config.validate()?;
        Ok(config)
    }
}
