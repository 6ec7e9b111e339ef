#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use sweep_core::{
    DeleteSummary, ImageFailure, ImageId, ImagePage, ImageRegistry, RegistryError,
    RegistryOperation,
};

/// A registry call as the mock saw it.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List {
        repository: String,
        next_token: Option<String>,
    },
    BatchDelete {
        repository: String,
        image_ids: Vec<ImageId>,
    },
}

#[derive(Default)]
struct State {
    pages: Vec<Vec<ImageId>>,
    list_failure: Option<(usize, String)>,
    delete_failure: Option<String>,
    rejected: Vec<ImageId>,
    calls: Vec<Call>,
}

/// In-memory registry holding a single repository split into fixed pages.
///
/// Page `n` (from zero) is requested with token `token-n`; the first page
/// with no token. A successful batch delete leaves only rejected images.
#[derive(Default, Clone)]
pub struct MockRegistry {
    state: Arc<Mutex<State>>,
}

impl MockRegistry {
    pub fn empty() -> Self {
        Self::with_pages(vec![Vec::new()])
    }

    pub fn with_pages(pages: Vec<Vec<ImageId>>) -> Self {
        let registry = Self::default();
        registry.state.lock().unwrap().pages = pages;
        registry
    }

    /// Fail the ListImages call for page `page` with a service error code.
    pub fn fail_list_at(self, page: usize, code: &str) -> Self {
        self.state.lock().unwrap().list_failure = Some((page, code.to_string()));
        self
    }

    /// Fail every BatchDeleteImage call with a service error code.
    pub fn fail_delete(self, code: &str) -> Self {
        self.state.lock().unwrap().delete_failure = Some(code.to_string());
        self
    }

    /// Report `image_id` as a per-image failure inside a successful delete.
    pub fn reject(self, image_id: ImageId) -> Self {
        self.state.lock().unwrap().rejected.push(image_id);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn delete_calls(&self) -> Vec<Vec<ImageId>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::BatchDelete { image_ids, .. } => Some(image_ids),
                Call::List { .. } => None,
            })
            .collect()
    }

    pub fn remaining_images(&self) -> Vec<ImageId> {
        self.state.lock().unwrap().pages.concat()
    }
}

fn token_for(page: usize) -> String {
    format!("token-{}", page)
}

#[async_trait]
impl ImageRegistry for MockRegistry {
    async fn list_images(
        &self,
        repository: &str,
        next_token: Option<String>,
    ) -> Result<ImagePage, RegistryError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::List {
            repository: repository.to_string(),
            next_token: next_token.clone(),
        });

        let index = match &next_token {
            None => 0,
            Some(token) => match token.strip_prefix("token-").and_then(|n| n.parse().ok()) {
                Some(index) => index,
                None => {
                    return Err(RegistryError::new(
                        RegistryOperation::ListImages,
                        repository,
                        format!("Invalid NextToken {}", token),
                    )
                    .with_code("InvalidParameterException"))
                }
            },
        };

        if let Some((page, code)) = &state.list_failure {
            if *page == index {
                return Err(RegistryError::new(
                    RegistryOperation::ListImages,
                    repository,
                    "injected list failure",
                )
                .with_code(code.clone()));
            }
        }

        let image_ids = state.pages.get(index).cloned().unwrap_or_default();
        if index + 1 < state.pages.len() {
            Ok(ImagePage::with_next(image_ids, token_for(index + 1)))
        } else {
            Ok(ImagePage::last(image_ids))
        }
    }

    async fn batch_delete_images(
        &self,
        repository: &str,
        image_ids: Vec<ImageId>,
    ) -> Result<DeleteSummary, RegistryError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::BatchDelete {
            repository: repository.to_string(),
            image_ids: image_ids.clone(),
        });

        if let Some(code) = &state.delete_failure {
            return Err(RegistryError::new(
                RegistryOperation::BatchDeleteImage,
                repository,
                "injected delete failure",
            )
            .with_code(code.clone()));
        }

        let rejected = state.rejected.clone();
        let (failed, deleted): (Vec<ImageId>, Vec<ImageId>) =
            image_ids.into_iter().partition(|id| rejected.contains(id));

        state.pages = vec![failed.clone()];

        Ok(DeleteSummary {
            deleted,
            failures: failed
                .into_iter()
                .map(|id| ImageFailure {
                    image_id: Some(id),
                    code: Some("ImageReferencedByManifestList".to_string()),
                    reason: Some("image is referenced by a manifest list".to_string()),
                })
                .collect(),
        })
    }
}

/// `count` untagged images whose digests start with `prefix`.
pub fn images(prefix: &str, count: usize) -> Vec<ImageId> {
    (0..count)
        .map(|i| ImageId::digest(format!("sha256:{}{:060}", prefix, i)))
        .collect()
}

/// A custom resource event as the provider framework delivers it.
pub fn lifecycle_event(request_type: &str, repository: &str) -> Value {
    json!({
        "RequestType": request_type,
        "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:empty-repo-provider",
        "ResponseURL": "https://cloudformation-custom-resource-response-useast1.s3.amazonaws.com/r",
        "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/app/7f4e",
        "RequestId": "a4b1c2d3-0000-4000-8000-000000000001",
        "LogicalResourceId": "EmptyImageRepo",
        "ResourceType": "Custom::EmptyImageRepo",
        "ResourceProperties": {
            "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:empty-repo-provider",
            "imageRepoName": repository
        }
    })
}
