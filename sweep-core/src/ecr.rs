//! Amazon ECR implementation of [`ImageRegistry`].

use async_trait::async_trait;
use aws_sdk_ecr::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_ecr::types::{ImageFailure as EcrImageFailure, ImageIdentifier};
use aws_sdk_ecr::Client;

use crate::config::SweepConfig;
use crate::error::{RegistryError, RegistryOperation};
use crate::image::{DeleteSummary, ImageFailure, ImageId, ImagePage};
use crate::registry::ImageRegistry;

/// ECR-backed image registry.
#[derive(Debug, Clone)]
pub struct EcrRegistry {
    client: Client,
    registry_id: Option<String>,
    page_size: Option<i32>,
}

impl EcrRegistry {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            registry_id: None,
            page_size: None,
        }
    }

    /// Build a registry from configuration, creating its own client.
    pub async fn from_config(config: &SweepConfig) -> Self {
        let mut registry = Self::new(config.ecr_client().await);
        if let Some(registry_id) = &config.registry_id {
            registry = registry.with_registry_id(registry_id.clone());
        }
        if let Some(page_size) = config.page_size {
            registry = registry.with_page_size(page_size);
        }
        registry
    }

    pub fn with_registry_id(mut self, registry_id: impl Into<String>) -> Self {
        self.registry_id = Some(registry_id.into());
        self
    }

    pub fn with_page_size(mut self, page_size: i32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

#[async_trait]
impl ImageRegistry for EcrRegistry {
    async fn list_images(
        &self,
        repository: &str,
        next_token: Option<String>,
    ) -> Result<ImagePage, RegistryError> {
        let output = self
            .client
            .list_images()
            .repository_name(repository)
            .set_registry_id(self.registry_id.clone())
            .set_max_results(self.page_size)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| registry_error(RegistryOperation::ListImages, repository, e))?;

        let image_ids = output.image_ids().iter().map(ImageId::from).collect();
        Ok(match output.next_token() {
            Some(next_token) => ImagePage::with_next(image_ids, next_token),
            None => ImagePage::last(image_ids),
        })
    }

    async fn batch_delete_images(
        &self,
        repository: &str,
        image_ids: Vec<ImageId>,
    ) -> Result<DeleteSummary, RegistryError> {
        let image_ids = image_ids.into_iter().map(ImageIdentifier::from).collect();

        let output = self
            .client
            .batch_delete_image()
            .repository_name(repository)
            .set_registry_id(self.registry_id.clone())
            .set_image_ids(Some(image_ids))
            .send()
            .await
            .map_err(|e| registry_error(RegistryOperation::BatchDeleteImage, repository, e))?;

        Ok(DeleteSummary {
            deleted: output.image_ids().iter().map(ImageId::from).collect(),
            failures: output.failures().iter().map(ImageFailure::from).collect(),
        })
    }
}

fn registry_error<E>(
    operation: RegistryOperation,
    repository: &str,
    err: SdkError<E>,
) -> RegistryError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());

    let mut error = RegistryError::new(operation, repository, message);
    if let Some(code) = err.code() {
        error = error.with_code(code);
    }
    error.with_source(err)
}

impl From<&ImageIdentifier> for ImageId {
    fn from(id: &ImageIdentifier) -> Self {
        ImageId {
            digest: id.image_digest().map(str::to_string),
            tag: id.image_tag().map(str::to_string),
        }
    }
}

impl From<ImageId> for ImageIdentifier {
    fn from(id: ImageId) -> Self {
        ImageIdentifier::builder()
            .set_image_digest(id.digest)
            .set_image_tag(id.tag)
            .build()
    }
}

impl From<&EcrImageFailure> for ImageFailure {
    fn from(failure: &EcrImageFailure) -> Self {
        ImageFailure {
            image_id: failure.image_id().map(ImageId::from),
            code: failure.failure_code().map(|code| code.as_str().to_string()),
            reason: failure.failure_reason().map(str::to_string),
        }
    }
}
