//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use futures::{StreamExt, TryStreamExt};
use serde_json::Value;
use sweep_core::{
    collect_image_ids, empty_repository, image_pages, EmptyOutcome, ImageRegistry, LifecycleHandler,
};
use tracing::debug;

use crate::render::{failure_table, image_table};

/// Print every image in `repository`.
pub async fn list<R: ImageRegistry>(registry: &R, repository: &str) -> Result<()> {
    let mut pages = image_pages(registry, repository).boxed();
    let mut image_ids = Vec::new();

    while let Some(page) = pages
        .try_next()
        .await
        .with_context(|| format!("Failed to list images in {}", repository))?
    {
        debug!(
            images = page.image_ids.len(),
            more = page.next_token.is_some(),
            "Fetched page"
        );
        image_ids.extend(page.image_ids);
    }

    if image_ids.is_empty() {
        println!("{} has no images", repository.bold());
        return Ok(());
    }

    println!("{}", image_table(&image_ids));
    println!("{} image(s) in {}", image_ids.len(), repository.bold());
    Ok(())
}

/// Delete every image in `repository`, or only count them on a dry run.
pub async fn empty<R: ImageRegistry>(registry: &R, repository: &str, dry_run: bool) -> Result<()> {
    if dry_run {
        let image_ids = collect_image_ids(registry, repository)
            .await
            .with_context(|| format!("Failed to list images in {}", repository))?;
        println!(
            "{} image(s) would be deleted from {}",
            image_ids.len(),
            repository.bold()
        );
        return Ok(());
    }

    let outcome = empty_repository(registry, repository)
        .await
        .with_context(|| format!("Failed to empty {}", repository))?;

    match outcome {
        EmptyOutcome::AlreadyEmpty => {
            println!("{} is already empty", repository.bold());
        }
        EmptyOutcome::Deleted(summary) => {
            println!(
                "{}",
                format!("Deleted {} image(s) from {}", summary.deleted.len(), repository).green()
            );
            if !summary.failures.is_empty() {
                println!(
                    "{}",
                    format!("{} image(s) could not be deleted:", summary.failures.len()).yellow()
                );
                println!("{}", failure_table(&summary.failures));
            }
        }
    }
    Ok(())
}

/// Run an event file through the lifecycle handler, as the Lambda would.
pub async fn invoke<R: ImageRegistry>(registry: R, event_path: &Path) -> Result<()> {
    let raw = tokio::fs::read_to_string(event_path)
        .await
        .with_context(|| format!("Failed to read event file {}", event_path.display()))?;
    let payload: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Event file {} is not valid JSON", event_path.display()))?;

    LifecycleHandler::new(registry)
        .handle(payload)
        .await
        .context("Lifecycle handler failed")?;

    println!("{}", "Event handled".green());
    Ok(())
}
