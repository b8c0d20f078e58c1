//! galleria: static image galleries with a keyboard-driven lightbox
//!
//! Gallery manifests are rendered into a thumbnail grid page plus one
//! lightbox page per image. The interactive part lives in
//! [`viewer::GalleryViewer`], a small state machine that claims page-wide
//! resources from a [`page::Document`] while its lightbox is open.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod gallery;
pub mod generator;
pub mod helpers;
pub mod page;
pub mod server;
pub mod templates;
pub mod viewer;

pub use error::{GalleryError, Result};

use std::path::{Path, PathBuf};

/// The main application: a site directory and its configuration
#[derive(Debug, Clone)]
pub struct Galleria {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Galleria {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        })
    }

    /// Directory holding gallery manifests
    pub fn galleries_dir(&self) -> PathBuf {
        self.source_dir.join(&self.config.galleries_dir)
    }

    /// Path of the site configuration file
    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join("_config.yml")
    }

    /// Generate the static site
    pub fn generate(&self) -> anyhow::Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> anyhow::Result<()> {
        commands::clean::run(self)
    }
}
