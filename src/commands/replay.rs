//! Replay scripted interactions against a gallery viewer

use anyhow::Result;

use crate::content::loader::ManifestLoader;
use crate::error::GalleryError;
use crate::page::Document;
use crate::viewer::{Event, GalleryViewer, ViewerState};
use crate::Galleria;

/// State of the viewer and the page after one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayStep {
    pub event: String,
    pub state: ViewerState,
    pub scroll_locked: bool,
    pub key_listeners: usize,
}

/// Drive a fresh viewer through `events`
///
/// All events are parsed before any is applied. The viewer is dropped at
/// the end, so the returned document must be idle again.
pub fn replay(
    mut viewer: GalleryViewer,
    document: &Document,
    events: &[String],
) -> Result<Vec<ReplayStep>> {
    let parsed = events
        .iter()
        .map(|e| e.parse::<Event>())
        .collect::<Result<Vec<_>, GalleryError>>()?;

    let mut steps = Vec::with_capacity(parsed.len());
    for (raw, event) in events.iter().zip(&parsed) {
        viewer.dispatch(event);
        steps.push(ReplayStep {
            event: raw.clone(),
            state: viewer.state(),
            scroll_locked: document.is_scroll_locked(),
            key_listeners: document.key_listener_count(),
        });
    }

    Ok(steps)
}

/// Replay events against the gallery named `slug` and print each step
pub fn run(galleria: &Galleria, slug: &str, events: &[String]) -> Result<()> {
    let manifest = ManifestLoader::new(galleria)
        .find(slug)?
        .ok_or_else(|| GalleryError::UnknownGallery(slug.to_string()))?;

    let document = Document::new();
    let viewer = GalleryViewer::new(&document, manifest.images);
    let total = viewer.gallery().len();
    println!("{} ({} images)", slug, total);

    for step in replay(viewer, &document, events)? {
        let state = match step.state {
            ViewerState::Closed => "closed".to_string(),
            ViewerState::Open { index } => format!("open {} / {}", index + 1, total),
        };
        println!(
            "  {:<16} {:<12} scroll-lock={} listeners={}",
            step.event, state, step.scroll_locked, step.key_listeners
        );
    }

    if !document.is_idle() {
        return Err(GalleryError::ResourceLeak {
            gallery: slug.to_string(),
            held: document.held(),
        }
        .into());
    }

    Ok(())
}
