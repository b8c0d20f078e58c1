//! List galleries

use anyhow::Result;

use crate::content::loader::ManifestLoader;
use crate::gallery::Gallery;
use crate::Galleria;

/// One row of the gallery listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryRow {
    pub slug: String,
    pub title: String,
    pub kept: usize,
    pub dropped: usize,
    pub source: String,
}

/// Collect kept/dropped image counts for every manifest
pub fn rows(galleria: &Galleria) -> Result<Vec<GalleryRow>> {
    let manifests = ManifestLoader::new(galleria).load_manifests()?;

    Ok(manifests
        .into_iter()
        .map(|manifest| {
            let total = manifest.images.len();
            let kept = Gallery::new(manifest.images.iter().cloned()).len();
            GalleryRow {
                slug: manifest.slug().to_string(),
                title: manifest.display_title().to_string(),
                kept,
                dropped: total - kept,
                source: manifest.source.clone(),
            }
        })
        .collect())
}

/// Print every gallery with its image counts
pub fn run(galleria: &Galleria) -> Result<()> {
    let rows = rows(galleria)?;
    println!("Galleries ({}):", rows.len());
    for row in rows {
        if row.dropped > 0 {
            println!(
                "  {} - {} [{}] {} images ({} dropped)",
                row.slug, row.title, row.source, row.kept, row.dropped
            );
        } else {
            println!(
                "  {} - {} [{}] {} images",
                row.slug, row.title, row.source, row.kept
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_rows_count_dropped_images() {
        let dir = TempDir::new().unwrap();
        let galleries = dir.path().join("source/_galleries");
        fs::create_dir_all(&galleries).unwrap();
        fs::write(
            galleries.join("porto.yml"),
            "title: Porto\nimages:\n  - url: a.jpg\n    imgix_url: p/a.jpg\n  - url: b.jpg\n    imgix_url: ''\n",
        )
        .unwrap();

        let galleria = Galleria::new(dir.path()).unwrap();
        let rows = rows(&galleria).unwrap();
        assert_eq!(
            rows,
            vec![GalleryRow {
                slug: "porto".to_string(),
                title: "Porto".to_string(),
                kept: 1,
                dropped: 1,
                source: "porto.yml".to_string(),
            }]
        );
    }
}
