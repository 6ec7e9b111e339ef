//! Image identifiers and the shapes the registry hands back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one stored image, by digest, by tag, or both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ImageId {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl ImageId {
    pub fn digest(digest: impl Into<String>) -> Self {
        Self {
            digest: Some(digest.into()),
            tag: None,
        }
    }

    pub fn tagged(digest: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            digest: Some(digest.into()),
            tag: Some(tag.into()),
        }
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.tag, &self.digest) {
            (Some(tag), Some(digest)) => write!(f, "{}@{}", tag, digest),
            (Some(tag), None) => write!(f, "{}", tag),
            (None, Some(digest)) => write!(f, "{}", digest),
            (None, None) => write!(f, "<untagged>"),
        }
    }
}

/// One page of a ListImages response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImagePage {
    pub image_ids: Vec<ImageId>,
    /// Present only when more pages follow
    pub next_token: Option<String>,
}

impl ImagePage {
    /// The last page of a listing.
    pub fn last(image_ids: Vec<ImageId>) -> Self {
        Self {
            image_ids,
            next_token: None,
        }
    }

    pub fn with_next(image_ids: Vec<ImageId>, next_token: impl Into<String>) -> Self {
        Self {
            image_ids,
            next_token: Some(next_token.into()),
        }
    }
}

/// An image the registry declined to delete inside an otherwise successful
/// batch call.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFailure {
    pub image_id: Option<ImageId>,
    pub code: Option<String>,
    pub reason: Option<String>,
}

/// What a BatchDeleteImage call reported back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteSummary {
    pub deleted: Vec<ImageId>,
    pub failures: Vec<ImageFailure>,
}
