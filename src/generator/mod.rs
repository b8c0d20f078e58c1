//! Generator module - renders gallery manifests into static HTML pages
//!
//! Each gallery gets a grid page plus one lightbox page per image. The
//! lightbox pages are produced by driving a [`GalleryViewer`] through every
//! open state, so the page resources it claims must all be back with the
//! [`Document`] once a gallery is done.
//!
//! Slugs are unique per run: when two manifests resolve to the same slug the
//! first one (in manifest order) wins and the other is skipped with a warning.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::content::Manifest;
use crate::error::{GalleryError, Result};
use crate::helpers::url_for;
use crate::page::Document;
use crate::templates::{GalleryLink, GalleryPage, TemplateRenderer};
use crate::viewer::{GalleryViewer, ViewConfig};
use crate::Galleria;

/// Summary of one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateStats {
    pub galleries: usize,
    pub skipped: usize,
    pub duplicates: usize,
    pub pages: usize,
    pub dropped_images: usize,
}

/// Static gallery generator
pub struct Generator {
    galleria: Galleria,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(galleria: &Galleria) -> Result<Self> {
        Ok(Self {
            galleria: galleria.clone(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Generate every gallery plus the index page
    pub fn generate(&self, manifests: &[Manifest]) -> Result<GenerateStats> {
        self.generate_matching(manifests, |_| true)
    }

    /// Regenerate the gallery published under `slug`, plus the index page
    ///
    /// The other galleries only contribute their index entries; their pages
    /// are left as they are.
    pub fn regenerate(&self, manifests: &[Manifest], slug: &str) -> Result<GenerateStats> {
        self.generate_matching(manifests, |manifest| manifest.slug() == slug)
    }

    fn generate_matching<F>(&self, manifests: &[Manifest], rebuild: F) -> Result<GenerateStats>
    where
        F: Fn(&Manifest) -> bool,
    {
        fs::create_dir_all(&self.galleria.public_dir)?;

        let mut stats = GenerateStats::default();
        let mut links = Vec::new();
        let mut seen = HashSet::new();

        for manifest in manifests {
            if !seen.insert(manifest.slug()) {
                tracing::warn!(
                    "Skipping {}: slug '{}' is already used by another gallery",
                    manifest.source,
                    manifest.slug()
                );
                stats.duplicates += 1;
                continue;
            }

            let document = Document::new();
            let viewer = GalleryViewer::new(&document, manifest.images.iter().cloned());
            let count = viewer.gallery().len();
            let rebuilt = rebuild(manifest);

            if rebuilt {
                stats.dropped_images += manifest.images.len() - count;
            }

            if count == 0 {
                if rebuilt {
                    tracing::debug!("Skipping empty gallery {}", manifest.slug());
                    self.remove_gallery(manifest.slug())?;
                    stats.skipped += 1;
                }
                continue;
            }

            if rebuilt {
                stats.pages += self.generate_gallery(manifest, viewer, &document)?;
                stats.galleries += 1;
            }

            links.push(GalleryLink {
                title: manifest.display_title().to_string(),
                href: url_for(&self.galleria.config, &format!("{}/", manifest.slug())),
                count,
                description: manifest.description.clone(),
            });
        }

        let index = self.renderer.render_index(&self.galleria.config, &links)?;
        write_page(&self.galleria.public_dir.join("index.html"), &index)?;
        stats.pages += 1;

        Ok(stats)
    }

    /// Remove the pages published under `slug`, if any
    pub fn remove_gallery(&self, slug: &str) -> Result<()> {
        let out_dir = self.galleria.public_dir.join(slug);
        if out_dir.is_dir() {
            fs::remove_dir_all(&out_dir)?;
            tracing::debug!("Removed {:?}", out_dir);
        }
        Ok(())
    }

    /// Render one gallery; returns the number of pages written
    fn generate_gallery(
        &self,
        manifest: &Manifest,
        mut viewer: GalleryViewer,
        document: &Document,
    ) -> Result<usize> {
        let config = &self.galleria.config;
        let slug = manifest.slug();
        let out_dir = self.galleria.public_dir.join(slug);
        let view_config = ViewConfig::from_gallery_config(
            &config.gallery,
            &url_for(config, &format!("{}/", slug)),
        );

        // Lightbox pages from a previous, longer run must not survive
        self.remove_gallery(slug)?;

        let mut pages = 0;
        let mut render = |viewer: &GalleryViewer, path: &Path| -> Result<()> {
            // Non-empty galleries always produce a view
            let Some(view) = viewer.view(&view_config) else {
                return Ok(());
            };
            let page = GalleryPage {
                config,
                slug,
                title: manifest.display_title(),
                description: manifest.description.as_deref(),
                view: &view,
            };
            let html = self.renderer.render_gallery(&page, document)?;
            write_page(path, &html)?;
            pages += 1;
            Ok(())
        };

        render(&viewer, &out_dir.join("index.html"))?;

        for index in 0..viewer.gallery().len() {
            viewer.open(index);
            let path = out_dir.join((index + 1).to_string()).join("index.html");
            let result = render(&viewer, &path);
            viewer.close();
            result?;
        }

        drop(viewer);
        if !document.is_idle() {
            return Err(GalleryError::ResourceLeak {
                gallery: slug.to_string(),
                held: document.held(),
            });
        }

        tracing::info!("Generated gallery {} ({} pages)", slug, pages);
        Ok(pages)
    }
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;
    tracing::debug!("Generated: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ImageDescriptor;
    use tempfile::TempDir;

    fn manifest(title: &str, images: Vec<ImageDescriptor>) -> Manifest {
        let mut manifest = Manifest {
            title: title.to_string(),
            images,
            ..Default::default()
        };
        manifest.resolve_slug();
        manifest
    }

    fn image(name: &str) -> ImageDescriptor {
        ImageDescriptor::new(
            format!("https://cdn.example.com/{}.jpg", name),
            format!("https://imgix.net/{}.jpg", name),
        )
    }

    #[test]
    fn test_generate_layout() {
        let dir = TempDir::new().unwrap();
        let galleria = Galleria::new(dir.path()).unwrap();
        let generator = Generator::new(&galleria).unwrap();

        let manifests = vec![
            manifest(
                "Lisbon",
                vec![
                    image("a"),
                    ImageDescriptor {
                        url: "broken.jpg".to_string(),
                        preview_url: None,
                    },
                    image("b"),
                ],
            ),
            manifest("Nothing Here", vec![ImageDescriptor::new("x.jpg", "")]),
        ];

        let stats = generator.generate(&manifests).unwrap();
        assert_eq!(
            stats,
            GenerateStats {
                galleries: 1,
                skipped: 1,
                duplicates: 0,
                pages: 4,
                dropped_images: 2,
            }
        );

        let public = &galleria.public_dir;
        assert!(public.join("index.html").exists());
        assert!(public.join("lisbon/index.html").exists());
        assert!(public.join("lisbon/1/index.html").exists());
        assert!(public.join("lisbon/2/index.html").exists());
        assert!(!public.join("lisbon/3").exists());
        assert!(!public.join("nothing-here").exists());

        let grid = fs::read_to_string(public.join("lisbon/index.html")).unwrap();
        assert!(!grid.contains("class=\"lightbox\""));

        let second = fs::read_to_string(public.join("lisbon/2/index.html")).unwrap();
        assert!(second.contains("2 / 2"));
        assert!(second.contains(r#"class="lightbox-next" href="/lisbon/1/""#));

        let index = fs::read_to_string(public.join("index.html")).unwrap();
        assert!(index.contains(r#"href="/lisbon/""#));
        assert!(!index.contains("Nothing Here"));
    }

    #[test]
    fn test_generate_respects_root() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), "root: /travel/\n").unwrap();
        let galleria = Galleria::new(dir.path()).unwrap();
        let generator = Generator::new(&galleria).unwrap();

        generator
            .generate(&[manifest("Hanoi", vec![image("pho")])])
            .unwrap();

        let page = fs::read_to_string(galleria.public_dir.join("hanoi/1/index.html")).unwrap();
        assert!(page.contains(r#"class="lightbox-close" href="/travel/hanoi/""#));
        // A single image has no arrows
        assert!(!page.contains("lightbox-next"));
    }

    #[test]
    fn test_duplicate_slug_keeps_first_gallery() {
        let dir = TempDir::new().unwrap();
        let galleria = Galleria::new(dir.path()).unwrap();
        let generator = Generator::new(&galleria).unwrap();

        let manifests = vec![
            manifest("Lisbon", vec![image("a"), image("b"), image("c")]),
            manifest("Lisbon!", vec![image("z")]),
        ];
        assert_eq!(manifests[0].slug(), manifests[1].slug());

        let stats = generator.generate(&manifests).unwrap();
        assert_eq!(stats.galleries, 1);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stats.pages, 5);

        let public = &galleria.public_dir;
        assert!(public.join("lisbon/3/index.html").exists());
        let grid = fs::read_to_string(public.join("lisbon/index.html")).unwrap();
        assert_eq!(grid.matches("class=\"gallery-thumb\"").count(), 3);
        assert!(!grid.contains("z.jpg"));

        let index = fs::read_to_string(public.join("index.html")).unwrap();
        assert_eq!(index.matches(r#"href="/lisbon/""#).count(), 1);
        assert!(!index.contains("Lisbon!"));
    }

    #[test]
    fn test_shrunk_gallery_drops_stale_pages() {
        let dir = TempDir::new().unwrap();
        let galleria = Galleria::new(dir.path()).unwrap();
        let generator = Generator::new(&galleria).unwrap();
        let public = &galleria.public_dir;

        generator
            .generate(&[manifest("Porto", vec![image("a"), image("b"), image("c")])])
            .unwrap();
        assert!(public.join("porto/3/index.html").exists());

        generator
            .generate(&[manifest("Porto", vec![image("a")])])
            .unwrap();
        assert!(public.join("porto/1/index.html").exists());
        assert!(!public.join("porto/2").exists());
        assert!(!public.join("porto/3").exists());

        // A gallery that loses every usable image disappears entirely
        let stats = generator
            .generate(&[manifest("Porto", vec![ImageDescriptor::new("a.jpg", " ")])])
            .unwrap();
        assert_eq!(stats.skipped, 1);
        assert!(!public.join("porto").exists());
    }

    #[test]
    fn test_regenerate_single_gallery() {
        let dir = TempDir::new().unwrap();
        let galleria = Galleria::new(dir.path()).unwrap();
        let generator = Generator::new(&galleria).unwrap();
        let public = &galleria.public_dir;

        let mut manifests = vec![
            manifest("Hanoi", vec![image("pho")]),
            manifest("Seville", vec![image("tapas"), image("churros")]),
        ];
        generator.generate(&manifests).unwrap();

        // Hanoi's pages are left alone while Seville is rebuilt
        fs::write(public.join("hanoi/index.html"), "kept").unwrap();
        manifests[1] = manifest("Seville", vec![image("tapas")]);

        let stats = generator.regenerate(&manifests, "seville").unwrap();
        assert_eq!(stats.galleries, 1);
        assert_eq!(stats.pages, 3);
        assert_eq!(
            fs::read_to_string(public.join("hanoi/index.html")).unwrap(),
            "kept"
        );
        assert!(!public.join("seville/2").exists());

        let index = fs::read_to_string(public.join("index.html")).unwrap();
        assert!(index.contains(r#"href="/hanoi/""#));
        assert!(index.contains("(1)"));
        assert!(!index.contains("(2)"));
    }
}
