//! Gallery watcher: turns file events into the smallest rebuild covering them

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::broadcast;

use crate::content::loader::{is_manifest_file, load_manifest, ManifestLoader};
use crate::content::Manifest;
use crate::generator::Generator;
use crate::Galleria;

/// What open pages should reload after a rebuild
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reload {
    Site,
    Gallery(String),
}

impl Reload {
    /// Message understood by the injected live reload script
    pub fn message(&self) -> String {
        match self {
            Reload::Site => "reload".to_string(),
            Reload::Gallery(slug) => format!("reload:{}", slug),
        }
    }
}

/// A debounced batch of file events, reduced to what needs rebuilding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Config edits, deleted manifests, or several manifests at once
    Site,
    /// One manifest was written
    Manifest(PathBuf),
}

impl Change {
    /// Classify changed paths; `None` when nothing relevant changed
    pub fn classify(galleria: &Galleria, paths: &[PathBuf]) -> Option<Self> {
        let config_path = canonical(&galleria.config_path());
        let mut manifests: Vec<&PathBuf> = Vec::new();

        for path in paths.iter().filter(|path| !is_editor_noise(path)) {
            if canonical(path) == config_path {
                return Some(Change::Site);
            }
            if is_manifest_file(path) && !manifests.contains(&path) {
                manifests.push(path);
            }
        }

        match manifests.as_slice() {
            [] => None,
            [path] if path.is_file() => Some(Change::Manifest(path.to_path_buf())),
            _ => Some(Change::Site),
        }
    }
}

/// Regenerates galleries and remembers which slug each manifest publishes,
/// so renamed or deleted galleries do not leave pages behind
pub struct Rebuilder {
    galleria: Galleria,
    published: HashMap<PathBuf, String>,
}

impl Rebuilder {
    pub fn new(galleria: Galleria) -> Result<Self> {
        let manifests = ManifestLoader::new(&galleria).load_manifests()?;
        Ok(Self {
            published: published(&manifests),
            galleria,
        })
    }

    pub fn rebuild(&mut self, change: &Change) -> Result<Reload> {
        match change {
            Change::Site => self.rebuild_site(),
            Change::Manifest(path) => self.rebuild_gallery(path),
        }
    }

    fn rebuild_gallery(&mut self, path: &Path) -> Result<Reload> {
        // A manifest that no longer parses leaves its pages as they were
        let manifest = load_manifest(path, &self.galleria.galleries_dir())?;
        let slug = manifest.slug().to_string();
        let key = canonical(path);

        if self
            .published
            .get(&key)
            .is_some_and(|previous| *previous != slug)
        {
            tracing::info!("{} now publishes {}", manifest.source, slug);
            return self.rebuild_site();
        }

        let manifests = ManifestLoader::new(&self.galleria).load_manifests()?;
        let stats = Generator::new(&self.galleria)?.regenerate(&manifests, &slug)?;
        tracing::info!("Rebuilt gallery {} ({} pages)", slug, stats.pages);

        self.published.insert(key, slug.clone());
        Ok(Reload::Gallery(slug))
    }

    fn rebuild_site(&mut self) -> Result<Reload> {
        // Pick up edits to _config.yml
        self.galleria = Galleria::new(&self.galleria.base_dir)?;

        let manifests = ManifestLoader::new(&self.galleria).load_manifests()?;
        let generator = Generator::new(&self.galleria)?;
        let stats = generator.generate(&manifests)?;

        let current = published(&manifests);
        for slug in self.published.values() {
            if !current.values().any(|live| live == slug) {
                generator.remove_gallery(slug)?;
                tracing::info!("Removed gallery {}", slug);
            }
        }
        self.published = current;

        tracing::info!(
            "Rebuilt {} galleries ({} pages)",
            stats.galleries,
            stats.pages
        );
        Ok(Reload::Site)
    }
}

/// Watch manifests and the config file until the event channel closes
pub fn run(galleria: Galleria, reloads: broadcast::Sender<Reload>) -> Result<()> {
    let galleries_dir = galleria.galleries_dir();
    let config_path = galleria.config_path();

    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(300), tx)?;

    // Watched even when empty so the first manifest is picked up
    fs::create_dir_all(&galleries_dir)?;
    debouncer
        .watcher()
        .watch(&galleries_dir, RecursiveMode::Recursive)?;
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
    }
    tracing::info!("Watching {:?} for gallery changes", galleries_dir);

    let mut rebuilder = Rebuilder::new(galleria)?;

    for result in rx {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!("Watch error: {:?}", e);
                continue;
            }
        };

        let paths: Vec<PathBuf> = events.into_iter().map(|event| event.path).collect();
        let Some(change) = Change::classify(&rebuilder.galleria, &paths) else {
            continue;
        };
        tracing::debug!("Rebuilding for {:?}", change);

        match rebuilder.rebuild(&change) {
            // No open pages is not an error
            Ok(reload) => {
                let _ = reloads.send(reload);
            }
            Err(e) => tracing::error!("Rebuild failed: {:#}", e),
        }
    }

    Ok(())
}

fn published(manifests: &[Manifest]) -> HashMap<PathBuf, String> {
    manifests
        .iter()
        .map(|manifest| (canonical(&manifest.full_source), manifest.slug().to_string()))
        .collect()
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Swap files, backups and VCS internals
fn is_editor_noise(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    name.starts_with('.')
        || name.ends_with('~')
        || path.components().any(|c| c.as_os_str() == ".git")
}
