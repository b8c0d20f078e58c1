//! Serializable component tree of a gallery viewer

use serde::Serialize;

use super::GalleryViewer;
use crate::config::{GalleryConfig, Transform};
use crate::helpers::transform_url;

/// Rendering options for the component tree
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub alt_prefix: String,
    pub instructions: String,
    pub thumbnail: Transform,
    pub full: Transform,
    /// URL of the gallery's grid page; lightbox pages live below it
    pub base_path: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::from_gallery_config(&GalleryConfig::default(), "/")
    }
}

impl ViewConfig {
    pub fn from_gallery_config(config: &GalleryConfig, base_path: &str) -> Self {
        let base_path = format!("{}/", base_path.trim_end_matches('/'));
        Self {
            alt_prefix: config.alt_prefix.clone(),
            instructions: config.instructions.clone(),
            thumbnail: config.thumbnail.clone(),
            full: config.full.clone(),
            base_path,
        }
    }

    /// Link to the lightbox page of the image at `index`
    pub fn image_href(&self, index: usize) -> String {
        format!("{}{}/", self.base_path, index + 1)
    }

    fn alt(&self, index: usize) -> String {
        format!("{} {}", self.alt_prefix, index + 1)
    }
}

/// Grid plus, while open, the lightbox
#[derive(Debug, Clone, Serialize)]
pub struct GalleryView {
    pub thumbnails: Vec<ThumbnailView>,
    pub lightbox: Option<LightboxView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThumbnailView {
    pub index: usize,
    pub src: String,
    pub alt: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LightboxView {
    pub index: usize,
    pub total: usize,
    pub counter: String,
    pub src: String,
    pub alt: String,
    pub instructions: String,
    pub show_navigation: bool,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
    pub close_href: String,
}

pub(super) fn build(viewer: &GalleryViewer, config: &ViewConfig) -> Option<GalleryView> {
    let gallery = viewer.gallery();
    if gallery.is_empty() {
        return None;
    }

    let thumbnails = gallery
        .iter()
        .enumerate()
        .map(|(index, image)| ThumbnailView {
            index,
            src: transform_url(&image.preview_url, &config.thumbnail),
            alt: config.alt(index),
            href: config.image_href(index),
        })
        .collect();

    let lightbox = viewer.current_index().and_then(|index| {
        let image = gallery.get(index)?;
        let show_navigation = gallery.has_navigation();
        let nav_href = |i: usize| show_navigation.then(|| config.image_href(i));

        Some(LightboxView {
            index,
            total: gallery.len(),
            counter: viewer.counter().unwrap_or_default(),
            src: transform_url(&image.preview_url, &config.full),
            alt: config.alt(index),
            instructions: config.instructions.clone(),
            show_navigation,
            previous_href: nav_href(gallery.previous_index(index)),
            next_href: nav_href(gallery.next_index(index)),
            close_href: config.base_path.clone(),
        })
    });

    Some(GalleryView {
        thumbnails,
        lightbox,
    })
}
