//! Site configuration (_config.yml)

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    pub galleries_dir: String,

    // Gallery rendering
    #[serde(default)]
    pub gallery: GalleryConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Galleries".to_string(),
            description: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),
            galleries_dir: "_galleries".to_string(),

            gallery: GalleryConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Gallery grid and lightbox configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Alt text prefix, followed by the 1-based position
    pub alt_prefix: String,
    /// Hint shown at the bottom of the lightbox
    pub instructions: String,
    /// Grid columns on wide screens
    pub columns: usize,
    /// Transform applied to preview URLs for grid thumbnails
    #[serde(
        default = "Transform::thumbnail",
        deserialize_with = "Transform::deserialize_thumbnail"
    )]
    pub thumbnail: Transform,
    /// Transform applied to preview URLs for the lightbox image
    #[serde(default = "Transform::full", deserialize_with = "Transform::deserialize_full")]
    pub full: Transform,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            alt_prefix: "Gallery image".to_string(),
            instructions: "Press ESC to close • Use arrow keys or click arrows to navigate"
                .to_string(),
            columns: 3,
            thumbnail: Transform::thumbnail(),
            full: Transform::full(),
        }
    }
}

/// Image service transform parameters
///
/// Empty fields are left out of the generated query string. In
/// `_config.yml` each field overrides the built-in default on its own, so
/// `thumbnail: { width: 300 }` keeps the default height, fit and auto.
/// A width or height of `0` and an empty `fit`/`auto` remove the parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transform {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fit: String,
    pub auto: String,
}

impl Transform {
    /// Fixed aspect-ratio crop used by grid thumbnails
    pub fn thumbnail() -> Self {
        Self {
            width: Some(600),
            height: Some(400),
            fit: "crop".to_string(),
            auto: "format,compress".to_string(),
        }
    }

    /// Bounded rendition used inside the lightbox
    pub fn full() -> Self {
        Self {
            width: Some(1600),
            height: Some(1200),
            fit: "max".to_string(),
            auto: "format,compress".to_string(),
        }
    }

    fn deserialize_thumbnail<'de, D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(TransformOverride::deserialize(deserializer)?.apply(Self::thumbnail()))
    }

    fn deserialize_full<'de, D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(TransformOverride::deserialize(deserializer)?.apply(Self::full()))
    }
}

/// Transform fields as written in `_config.yml`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TransformOverride {
    width: Option<u32>,
    height: Option<u32>,
    fit: Option<String>,
    auto: Option<String>,
}

impl TransformOverride {
    fn apply(self, base: Transform) -> Transform {
        let size = |value: Option<u32>, default: Option<u32>| match value {
            Some(0) => None,
            Some(value) => Some(value),
            None => default,
        };
        Transform {
            width: size(self.width, base.width),
            height: size(self.height, base.height),
            fit: self.fit.unwrap_or(base.fit),
            auto: self.auto.unwrap_or(base.auto),
        }
    }
}
