//! Image registry abstraction.
//!
//! The lifecycle handler only ever talks to a registry through
//! [`ImageRegistry`], so the ECR client can be swapped for any other
//! implementation (including an in-memory one in tests).

use async_trait::async_trait;
use futures::stream::{self, Stream, TryStreamExt};

use crate::error::RegistryError;
use crate::image::{DeleteSummary, ImageId, ImagePage};

/// The two registry calls needed to empty a repository.
#[async_trait]
pub trait ImageRegistry: Send + Sync {
    /// Fetch one page of image identifiers, starting after `next_token`.
    async fn list_images(
        &self,
        repository: &str,
        next_token: Option<String>,
    ) -> Result<ImagePage, RegistryError>;

    /// Delete every image in `image_ids` with a single call.
    async fn batch_delete_images(
        &self,
        repository: &str,
        image_ids: Vec<ImageId>,
    ) -> Result<DeleteSummary, RegistryError>;
}

/// Where the page stream is in the listing.
enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Lazily list every page of a repository.
///
/// Each page is requested only once the previous one has been yielded and
/// carried a continuation token. The stream ends after the first page without
/// one, or after the first error.
pub fn image_pages<'a, R>(
    registry: &'a R,
    repository: &'a str,
) -> impl Stream<Item = Result<ImagePage, RegistryError>> + Send + 'a
where
    R: ImageRegistry + ?Sized,
{
    stream::try_unfold(Cursor::Start, move |cursor| async move {
        let next_token = match cursor {
            Cursor::Start => None,
            Cursor::Next(token) => Some(token),
            Cursor::Done => return Ok(None),
        };

        let page = registry.list_images(repository, next_token).await?;
        let cursor = match &page.next_token {
            Some(token) => Cursor::Next(token.clone()),
            None => Cursor::Done,
        };

        Ok::<_, RegistryError>(Some((page, cursor)))
    })
}

/// Collect the identifiers of every image in a repository, in listing order.
pub async fn collect_image_ids<R>(
    registry: &R,
    repository: &str,
) -> Result<Vec<ImageId>, RegistryError>
where
    R: ImageRegistry + ?Sized,
{
    image_pages(registry, repository)
        .try_fold(Vec::new(), |mut image_ids, page| async move {
            image_ids.extend(page.image_ids);
            Ok(image_ids)
        })
        .await
}
