//! Custom resource lifecycle handler.
//!
//! Create and Update are acknowledged without touching the registry. Delete
//! empties the repository named by the `imageRepoName` resource property so
//! that the stack can go on to delete the repository itself.

use serde_json::Value;
use tracing::{debug, info};

use crate::emptier::{empty_repository, EmptyOutcome};
use crate::error::Result;
use crate::event::{CustomResourceEvent, RequestType};
use crate::registry::ImageRegistry;

/// Handles lifecycle events against one image registry.
pub struct LifecycleHandler<R> {
    registry: R,
}

impl<R: ImageRegistry> LifecycleHandler<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Handle a raw event payload.
    ///
    /// The full payload is logged before it is decoded.
    pub async fn handle(&self, payload: Value) -> Result<()> {
        info!(event = %payload, "Received event");

        let event = CustomResourceEvent::from_value(payload)?;
        self.dispatch(&event).await
    }

    /// Handle an already decoded event.
    pub async fn dispatch(&self, event: &CustomResourceEvent) -> Result<()> {
        let request_type = event.request_type()?;

        match request_type {
            RequestType::Create | RequestType::Update => {
                debug!(%request_type, "Nothing to do");
                Ok(())
            }
            RequestType::Delete => {
                let repository = event.image_repo_name()?;
                match empty_repository(&self.registry, repository).await? {
                    EmptyOutcome::AlreadyEmpty => {
                        debug!(repository, "Repository already empty")
                    }
                    EmptyOutcome::Deleted(summary) => {
                        debug!(repository, deleted = summary.deleted.len(), "Repository emptied")
                    }
                }
                Ok(())
            }
        }
    }
}
