//! Raw image records as supplied by the content source

use serde::{Deserialize, Serialize};

/// An image entry before filtering
///
/// Content sources disagree on the preview key, so `imgix_url` and
/// `previewUrl` are accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Primary image URL
    #[serde(default)]
    pub url: String,

    /// Preview / transform base URL
    #[serde(default, alias = "imgix_url", alias = "previewUrl")]
    pub preview_url: Option<String>,
}

impl ImageDescriptor {
    /// Create a descriptor with both URLs set
    pub fn new(url: impl Into<String>, preview_url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            preview_url: Some(preview_url.into()),
        }
    }

    /// The preview reference, if it is usable
    pub fn usable_preview(&self) -> Option<&str> {
        self.preview_url
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}
