//! Initialize a new gallery site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# Galleria Configuration

# Site
title: Galleries
description: ''
language: en

# URL
url: http://example.com
root: /

# Directory
source_dir: source
public_dir: public
galleries_dir: _galleries

# Gallery
gallery:
  alt_prefix: Gallery image
  instructions: Press ESC to close • Use arrow keys or click arrows to navigate
  columns: 3
  thumbnail:
    width: 600
    height: 400
    fit: crop
    auto: format,compress
  full:
    width: 1600
    height: 1200
    fit: max
    auto: format,compress
"#;

const SAMPLE_GALLERY: &str = r#"title: Hello Gallery
description: Replace these entries with images from your content source.
images:
  - url: https://images.unsplash.com/photo-1504674900247-0877df9cc836
    imgix_url: https://images.unsplash.com/photo-1504674900247-0877df9cc836
  - url: https://images.unsplash.com/photo-1476224203421-9ac39bcb3327
    imgix_url: https://images.unsplash.com/photo-1476224203421-9ac39bcb3327
  - url: https://images.unsplash.com/photo-1488646953014-85cb44e25828
    imgix_url: https://images.unsplash.com/photo-1488646953014-85cb44e25828
"#;

/// Initialize a new site in the given directory
///
/// Existing files are left alone.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let galleries_dir = target_dir.join("source/_galleries");
    fs::create_dir_all(&galleries_dir)?;

    write_if_missing(&target_dir.join("_config.yml"), CONFIG_TEMPLATE)?;
    write_if_missing(&galleries_dir.join("hello-gallery.yml"), SAMPLE_GALLERY)?;

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::warn!("Skipping existing file {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::ManifestLoader;
    use crate::Galleria;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_loadable_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let galleria = Galleria::new(dir.path()).unwrap();
        assert_eq!(galleria.config.gallery.columns, 3);

        let manifests = ManifestLoader::new(&galleria).load_manifests().unwrap();
        assert_eq!(manifests.len(), 1);
        assert_eq!(manifests[0].slug(), "hello-gallery");
        assert_eq!(manifests[0].images.len(), 3);
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), "title: Mine\n").unwrap();
        init_site(dir.path()).unwrap();

        let galleria = Galleria::new(dir.path()).unwrap();
        assert_eq!(galleria.config.title, "Mine");
    }
}
