//! Gallery manifest model

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ImageDescriptor;

/// One gallery as described by a manifest file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Gallery title
    #[serde(default)]
    pub title: String,

    /// URL-friendly name; derived from the title or file name when absent
    #[serde(default)]
    pub slug: Option<String>,

    /// Optional description shown above the grid
    #[serde(default)]
    pub description: Option<String>,

    /// Candidate images in display order
    #[serde(default)]
    pub images: Vec<ImageDescriptor>,

    /// Source file path (relative to the galleries directory)
    #[serde(skip)]
    pub source: String,

    /// Full source file path
    #[serde(skip)]
    pub full_source: PathBuf,
}

impl Manifest {
    /// Resolve the slug: explicit value, then slugified title, then file stem
    pub fn resolve_slug(&mut self) {
        let explicit = self
            .slug
            .as_deref()
            .map(slug::slugify)
            .filter(|s| !s.is_empty());

        let resolved = explicit
            .or_else(|| Some(slug::slugify(&self.title)).filter(|s| !s.is_empty()))
            .or_else(|| {
                self.full_source
                    .file_stem()
                    .map(|stem| slug::slugify(stem.to_string_lossy()))
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or_else(|| "gallery".to_string());

        self.slug = Some(resolved);
    }

    /// The resolved slug
    pub fn slug(&self) -> &str {
        self.slug.as_deref().unwrap_or("gallery")
    }

    /// Title for display, falling back to the slug
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            self.slug()
        } else {
            &self.title
        }
    }
}
