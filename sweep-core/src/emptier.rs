//! Emptying a repository of all of its images.

use tracing::{debug, error};

use crate::error::RegistryError;
use crate::image::DeleteSummary;
use crate::registry::{collect_image_ids, ImageRegistry};

/// Result of emptying a repository.
#[derive(Debug, Clone, PartialEq)]
pub enum EmptyOutcome {
    /// The listing returned no images, so nothing was deleted
    AlreadyEmpty,
    /// One batch delete was issued for every listed image
    Deleted(DeleteSummary),
}

/// Delete every image in `repository`.
///
/// All pages are listed first; the collected identifiers then go out in a
/// single batch delete. No delete call is made for an empty repository.
/// Registry errors are logged and returned as-is. Images the registry
/// declines inside a successful batch are reported in the summary only.
pub async fn empty_repository<R>(
    registry: &R,
    repository: &str,
) -> Result<EmptyOutcome, RegistryError>
where
    R: ImageRegistry + ?Sized,
{
    match delete_all_images(registry, repository).await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            error!(
                repository,
                operation = %e.operation,
                code = e.code.as_deref().unwrap_or("unknown"),
                "Client error: {}",
                e
            );
            Err(e)
        }
    }
}

async fn delete_all_images<R>(
    registry: &R,
    repository: &str,
) -> Result<EmptyOutcome, RegistryError>
where
    R: ImageRegistry + ?Sized,
{
    let image_ids = collect_image_ids(registry, repository).await?;
    if image_ids.is_empty() {
        debug!(repository, "Repository has no images");
        return Ok(EmptyOutcome::AlreadyEmpty);
    }

    let requested = image_ids.len();
    debug!(repository, images = requested, "Deleting images");

    let summary = registry.batch_delete_images(repository, image_ids).await?;
    for failure in &summary.failures {
        let image = failure.image_id.clone().unwrap_or_default();
        debug!(
            repository,
            image = %image,
            code = failure.code.as_deref().unwrap_or("unknown"),
            "Image not deleted: {}",
            failure.reason.as_deref().unwrap_or("no reason given")
        );
    }

    debug!(
        repository,
        requested,
        deleted = summary.deleted.len(),
        failed = summary.failures.len(),
        "Batch delete finished"
    );
    Ok(EmptyOutcome::Deleted(summary))
}
