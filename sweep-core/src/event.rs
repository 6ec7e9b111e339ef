//! CloudFormation custom resource lifecycle events.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SweepError};

/// Resource property naming the repository to empty.
pub const IMAGE_REPO_NAME: &str = "imageRepoName";

/// Lifecycle stage the custom resource is going through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Create => "Create",
            RequestType::Update => "Update",
            RequestType::Delete => "Delete",
        }
    }
}

impl FromStr for RequestType {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Create" => Ok(RequestType::Create),
            "Update" => Ok(RequestType::Update),
            "Delete" => Ok(RequestType::Delete),
            other => Err(SweepError::InvalidRequestType(other.to_string())),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A custom resource request as delivered by the provider framework.
///
/// Only `RequestType` and, for Delete, `ResourceProperties.imageRepoName` are
/// interpreted. Everything else is carried as raw JSON, so an odd value in a
/// field the handler never reads cannot fail the request. `RequestType` is
/// kept as a string so an unknown value is reported as
/// [`SweepError::InvalidRequestType`] rather than a decode error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceEvent {
    #[serde(default)]
    pub request_type: Option<String>,
    #[serde(default)]
    pub request_id: Option<Value>,
    #[serde(default)]
    pub stack_id: Option<Value>,
    #[serde(default)]
    pub logical_resource_id: Option<Value>,
    #[serde(default)]
    pub physical_resource_id: Option<Value>,
    #[serde(default)]
    pub resource_type: Option<Value>,
    #[serde(default)]
    pub service_token: Option<Value>,
    #[serde(default)]
    pub resource_properties: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_resource_properties: Option<Value>,
}

impl CustomResourceEvent {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// The decoded request type.
    pub fn request_type(&self) -> Result<RequestType> {
        match self.request_type.as_deref() {
            Some(request_type) => request_type.parse(),
            None => Err(SweepError::InvalidEvent(
                "event has no RequestType".to_string(),
            )),
        }
    }

    /// The repository to empty, exactly as the template gave it.
    ///
    /// Absent, non-string and blank values are all rejected.
    pub fn image_repo_name(&self) -> Result<&str> {
        self.resource_properties
            .as_ref()
            .and_then(|properties| properties.get(IMAGE_REPO_NAME))
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .ok_or(SweepError::MissingProperty(IMAGE_REPO_NAME))
    }
}
