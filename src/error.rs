//! Library error types

use thiserror::Error;

/// Errors raised while loading, rendering or replaying galleries
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("Unknown gallery: {0}")]
    UnknownGallery(String),

    #[error("Page resources still held after rendering {gallery}: {held} unreleased claim(s)")]
    ResourceLeak { gallery: String, held: usize },
}

pub type Result<T> = std::result::Result<T, GalleryError>;
