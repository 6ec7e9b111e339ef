//! Core of repo-sweep.
//!
//! This crate handles CloudFormation custom resource lifecycle events for an
//! image repository: on Delete it lists every image in the repository and
//! removes them in one batch, so the stack can then delete the repository.
//! Create and Update are no-ops.

mod config;
mod ecr;
mod emptier;
mod error;
mod event;
mod handler;
mod image;
mod registry;

pub use config::{SweepConfig, ENV_PREFIX, MAX_PAGE_SIZE};
pub use ecr::EcrRegistry;
pub use emptier::{empty_repository, EmptyOutcome};
pub use error::{BoxError, RegistryError, RegistryOperation, Result, SweepError};
pub use event::{CustomResourceEvent, RequestType, IMAGE_REPO_NAME};
pub use handler::LifecycleHandler;
pub use image::{DeleteSummary, ImageFailure, ImageId, ImagePage};
pub use registry::{collect_image_ids, image_pages, ImageRegistry};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
