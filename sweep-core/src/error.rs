//! Error types for repository sweeping.

use std::fmt;

use thiserror::Error;

/// Boxed error kept as the source of a [`RegistryError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for lifecycle handling.
#[derive(Debug, Error)]
pub enum SweepError {
    /// The event carried a request type other than Create, Update or Delete
    #[error("Invalid request type: {0}")]
    InvalidRequestType(String),

    /// The event could not be decoded or has no request type
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// A resource property required by the request is absent or empty
    #[error("Missing resource property: {0}")]
    MissingProperty(&'static str),

    /// Configuration could not be loaded or is out of range
    #[error("Configuration error: {0}")]
    Config(String),

    /// The image registry rejected a call
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Result type alias for sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

impl From<serde_json::Error> for SweepError {
    fn from(err: serde_json::Error) -> Self {
        SweepError::InvalidEvent(err.to_string())
    }
}

impl From<envy::Error> for SweepError {
    fn from(err: envy::Error) -> Self {
        SweepError::Config(err.to_string())
    }
}

/// Registry call that produced a [`RegistryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryOperation {
    ListImages,
    BatchDeleteImage,
}

impl fmt::Display for RegistryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryOperation::ListImages => write!(f, "ListImages"),
            RegistryOperation::BatchDeleteImage => write!(f, "BatchDeleteImage"),
        }
    }
}

/// An error reported by the image registry service.
///
/// The service error code (e.g. `RepositoryNotFoundException`) is kept when the
/// registry provides one, and the original client error stays reachable
/// through [`std::error::Error::source`].
#[derive(Debug, Error)]
#[error("{operation} failed for repository {repository}: {message}")]
pub struct RegistryError {
    pub operation: RegistryOperation,
    pub repository: String,
    pub code: Option<String>,
    pub message: String,
    #[source]
    pub source: Option<BoxError>,
}

impl RegistryError {
    pub fn new(
        operation: RegistryOperation,
        repository: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            repository: repository.into(),
            code: None,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }
}
