//! Manifest loader - loads gallery manifests from the galleries directory

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::Manifest;
use crate::error::Result;
use crate::Galleria;

/// Loads gallery manifests from `source/_galleries`
pub struct ManifestLoader<'a> {
    galleria: &'a Galleria,
}

impl<'a> ManifestLoader<'a> {
    /// Create a new manifest loader
    pub fn new(galleria: &'a Galleria) -> Self {
        Self { galleria }
    }

    /// Load all manifests, sorted by slug and then by source path
    ///
    /// Files that fail to parse are skipped with a warning. Manifests sharing
    /// a slug stay adjacent, in a stable order.
    pub fn load_manifests(&self) -> Result<Vec<Manifest>> {
        let galleries_dir = self.galleria.galleries_dir();
        if !galleries_dir.exists() {
            tracing::debug!("No galleries directory at {:?}", galleries_dir);
            return Ok(Vec::new());
        }

        let mut manifests = Vec::new();

        for entry in WalkDir::new(&galleries_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_manifest_file(path) {
                match load_manifest(path, &galleries_dir) {
                    Ok(manifest) => manifests.push(manifest),
                    Err(e) => {
                        tracing::warn!("Failed to load manifest {:?}: {}", path, e);
                    }
                }
            }
        }

        manifests.sort_by(|a, b| {
            a.slug()
                .cmp(b.slug())
                .then_with(|| a.source.cmp(&b.source))
        });

        Ok(manifests)
    }

    /// Find a single manifest by slug
    pub fn find(&self, slug: &str) -> Result<Option<Manifest>> {
        Ok(self
            .load_manifests()?
            .into_iter()
            .find(|m| m.slug() == slug))
    }
}

/// Parse one manifest file (YAML or JSON, by extension)
pub fn load_manifest(path: &Path, base_dir: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path)?;

    let mut manifest: Manifest = if has_extension(path, &["json"]) {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };

    manifest.source = path
        .strip_prefix(base_dir)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/");
    manifest.full_source = path.to_path_buf();
    manifest.resolve_slug();

    tracing::debug!(
        "Loaded manifest {} ({} candidate images)",
        manifest.source,
        manifest.images.len()
    );

    Ok(manifest)
}

/// Check if a file is a gallery manifest
pub(crate) fn is_manifest_file(path: &Path) -> bool {
    has_extension(path, &["yml", "yaml", "json"])
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}
