//! Gallery viewer: thumbnail grid plus a keyboard-driven lightbox

mod input;
mod state;
mod view;

pub use input::{ClickTarget, Event, Key, KeyOutcome};
pub use state::ViewerState;
pub use view::{GalleryView, LightboxView, ThumbnailView, ViewConfig};

use crate::content::ImageDescriptor;
use crate::gallery::{Gallery, Image};
use crate::page::{Document, KeyListener, ScrollLock};

/// Page resources held while the lightbox is open
#[derive(Debug)]
struct Session {
    _scroll: ScrollLock,
    _keys: KeyListener,
}

/// Interactive gallery component
///
/// Opening claims the page scroll-lock and a key listener from the
/// [`Document`]; closing or dropping the viewer gives both back.
#[derive(Debug)]
pub struct GalleryViewer {
    gallery: Gallery,
    state: ViewerState,
    document: Document,
    session: Option<Session>,
}

impl GalleryViewer {
    /// Build a viewer from candidate images, dropping unusable ones
    pub fn new<I>(document: &Document, candidates: I) -> Self
    where
        I: IntoIterator<Item = ImageDescriptor>,
    {
        Self::with_gallery(document, Gallery::new(candidates))
    }

    pub fn with_gallery(document: &Document, gallery: Gallery) -> Self {
        Self {
            gallery,
            state: ViewerState::Closed,
            document: document.clone(),
            session: None,
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index()
    }

    pub fn current_image(&self) -> Option<&Image> {
        self.current_index().and_then(|i| self.gallery.get(i))
    }

    /// `"{position} / {total}"` while open
    pub fn counter(&self) -> Option<String> {
        self.current_index()
            .map(|i| format!("{} / {}", i + 1, self.gallery.len()))
    }

    /// Open the lightbox at `index`
    ///
    /// Returns false when there is no such thumbnail, which is always the
    /// case for an empty gallery.
    pub fn open(&mut self, index: usize) -> bool {
        if index >= self.gallery.len() {
            tracing::debug!("Ignoring open at {} ({} images)", index, self.gallery.len());
            return false;
        }

        if self.session.is_none() {
            self.session = Some(Session {
                _scroll: self.document.lock_scroll(),
                _keys: self.document.add_key_listener(),
            });
        }
        self.state = self.state.open(index, self.gallery.len());
        tracing::debug!("Lightbox opened at {}", index);
        true
    }

    pub fn next(&mut self) {
        self.state = self.state.next(self.gallery.len());
    }

    pub fn previous(&mut self) {
        self.state = self.state.previous(self.gallery.len());
    }

    /// Close the lightbox and release page resources
    pub fn close(&mut self) {
        if self.state.is_open() {
            tracing::debug!("Lightbox closed");
        }
        self.state = self.state.close();
        self.session = None;
    }

    /// Handle a page-level key press
    ///
    /// Keys are only seen while the lightbox is open; with no listener
    /// registered every key is ignored.
    pub fn handle_key(&mut self, key: &Key) -> KeyOutcome {
        if self.session.is_none() {
            return KeyOutcome::IGNORED;
        }
        tracing::trace!("Key {} while open", key);

        match key {
            Key::ArrowRight => {
                self.next();
                KeyOutcome {
                    handled: true,
                    prevent_default: true,
                }
            }
            Key::ArrowLeft => {
                self.previous();
                KeyOutcome {
                    handled: true,
                    prevent_default: true,
                }
            }
            Key::Escape => {
                self.close();
                KeyOutcome {
                    handled: true,
                    prevent_default: false,
                }
            }
            Key::Other(_) => KeyOutcome::IGNORED,
        }
    }

    /// Handle a click; returns true if the state changed
    pub fn click(&mut self, target: ClickTarget) -> bool {
        let before = self.state;

        match target {
            ClickTarget::Thumbnail(index) => {
                self.open(index);
            }
            ClickTarget::CloseButton | ClickTarget::Backdrop => self.close(),
            // The image swallows its own click so the backdrop never sees it
            ClickTarget::Image => {}
            ClickTarget::PreviousButton => self.previous(),
            ClickTarget::NextButton => self.next(),
        }

        self.state != before
    }

    /// Apply a scripted event
    pub fn dispatch(&mut self, event: &Event) {
        match event {
            Event::Click(target) => {
                self.click(*target);
            }
            Event::Key(key) => {
                self.handle_key(key);
            }
        }
    }

    /// Component tree for the current state; `None` for an empty gallery
    pub fn view(&self, config: &ViewConfig) -> Option<GalleryView> {
        view::build(self, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(doc: &Document, names: &[&str]) -> GalleryViewer {
        let candidates = names.iter().map(|n| {
            ImageDescriptor::new(format!("{}.jpg", n), format!("https://imgix.net/{}.jpg", n))
        });
        GalleryViewer::new(doc, candidates)
    }

    #[test]
    fn test_open_claims_page_resources() {
        let doc = Document::new();
        let mut v = viewer(&doc, &["a", "b", "c"]);
        assert!(!v.is_open());

        assert!(v.open(1));
        assert_eq!(v.current_index(), Some(1));
        assert!(doc.is_scroll_locked());
        assert_eq!(doc.key_listener_count(), 1);
    }

    #[test]
    fn test_reopen_moves_index_without_new_claims() {
        let doc = Document::new();
        let mut v = viewer(&doc, &["a", "b", "c"]);
        v.open(0);
        v.open(2);
        assert_eq!(v.current_index(), Some(2));
        assert_eq!(doc.claims(), 2);
        assert_eq!(doc.key_listener_count(), 1);
    }

    #[test]
    fn test_open_out_of_range() {
        let doc = Document::new();
        let mut v = viewer(&doc, &["a"]);
        assert!(!v.open(1));
        assert!(!v.is_open());
        assert_eq!(doc.claims(), 0);
    }

    #[test]
    fn test_empty_gallery_never_opens() {
        let doc = Document::new();
        let mut v = GalleryViewer::new(
            &doc,
            vec![ImageDescriptor {
                url: "a.jpg".to_string(),
                preview_url: None,
            }],
        );
        assert!(v.gallery().is_empty());
        assert!(!v.open(0));
        assert!(!v.click(ClickTarget::Thumbnail(0)));
        assert_eq!(v.handle_key(&Key::ArrowRight), KeyOutcome::IGNORED);
        assert!(v.view(&ViewConfig::default()).is_none());
        assert_eq!(doc.claims(), 0);
    }

    #[test]
    fn test_three_image_scenario() {
        let doc = Document::new();
        let mut v = viewer(&doc, &["a", "b", "c"]);
        v.click(ClickTarget::Thumbnail(0));
        v.handle_key(&Key::ArrowRight);
        v.handle_key(&Key::ArrowRight);
        assert_eq!(v.current_index(), Some(2));
        assert_eq!(v.current_image().unwrap().url, "c.jpg");
        v.handle_key(&Key::ArrowRight);
        assert_eq!(v.current_index(), Some(0));
        assert_eq!(v.current_image().unwrap().url, "a.jpg");
    }

    #[test]
    fn test_two_image_scenario() {
        let doc = Document::new();
        let mut v = viewer(&doc, &["a", "b"]);
        v.click(ClickTarget::Thumbnail(1));
        v.handle_key(&Key::ArrowLeft);
        assert_eq!(v.current_index(), Some(0));
        v.handle_key(&Key::ArrowLeft);
        assert_eq!(v.current_index(), Some(1));
    }

    #[test]
    fn test_single_image_navigation_is_noop() {
        let doc = Document::new();
        let mut v = viewer(&doc, &["a"]);
        v.open(0);
        v.next();
        v.previous();
        v.handle_key(&Key::ArrowRight);
        assert!(!v.click(ClickTarget::NextButton));
        assert_eq!(v.current_index(), Some(0));

        let view = v.view(&ViewConfig::default()).unwrap();
        assert!(!view.lightbox.unwrap().show_navigation);
    }

    #[test]
    fn test_arrow_keys_suppress_default() {
        let doc = Document::new();
        let mut v = viewer(&doc, &["a", "b"]);
        v.open(0);
        let outcome = v.handle_key(&Key::ArrowRight);
        assert!(outcome.handled && outcome.prevent_default);
        let outcome = v.handle_key(&Key::ArrowLeft);
        assert!(outcome.handled && outcome.prevent_default);
        assert_eq!(
            v.handle_key(&Key::Other("Enter".to_string())),
            KeyOutcome::IGNORED
        );
    }

    #[test]
    fn test_keys_ignored_while_closed() {
        let doc = Document::new();
        let mut v = viewer(&doc, &["a", "b"]);
        assert_eq!(v.handle_key(&Key::ArrowRight), KeyOutcome::IGNORED);
        assert_eq!(v.handle_key(&Key::Escape), KeyOutcome::IGNORED);
        assert!(!v.is_open());
        assert_eq!(doc.key_listener_count(), 0);
    }

    #[test]
    fn test_every_close_path_releases_scroll_lock() {
        let close_paths: Vec<Box<dyn Fn(&mut GalleryViewer)>> = vec![
            Box::new(|v: &mut GalleryViewer| {
                v.click(ClickTarget::Backdrop);
            }),
            Box::new(|v: &mut GalleryViewer| {
                v.click(ClickTarget::CloseButton);
            }),
            Box::new(|v: &mut GalleryViewer| {
                let outcome = v.handle_key(&Key::Escape);
                assert!(outcome.handled && !outcome.prevent_default);
            }),
        ];

        for close in close_paths {
            let doc = Document::new();
            let mut v = viewer(&doc, &["a", "b", "c"]);
            v.open(1);
            close(&mut v);
            assert!(!v.is_open());
            assert!(!doc.is_scroll_locked());
            assert_eq!(doc.key_listener_count(), 0);
            assert!(doc.is_idle());
        }
    }

    #[test]
    fn test_image_click_keeps_lightbox_open() {
        let doc = Document::new();
        let mut v = viewer(&doc, &["a", "b"]);
        v.open(1);
        assert!(!v.click(ClickTarget::Image));
        assert!(v.is_open());
        assert_eq!(v.current_index(), Some(1));
        assert!(doc.is_scroll_locked());
    }

    #[test]
    fn test_buttons_navigate() {
        let doc = Document::new();
        let mut v = viewer(&doc, &["a", "b", "c"]);
        v.open(0);
        assert!(v.click(ClickTarget::PreviousButton));
        assert_eq!(v.current_index(), Some(2));
        assert!(v.click(ClickTarget::NextButton));
        assert_eq!(v.current_index(), Some(0));
    }

    #[test]
    fn test_drop_while_open_releases_resources() {
        let doc = Document::new();
        {
            let mut v = viewer(&doc, &["a", "b"]);
            v.open(0);
            assert!(doc.is_scroll_locked());
        }
        assert!(!doc.is_scroll_locked());
        assert_eq!(doc.key_listener_count(), 0);
        assert!(doc.is_idle());
    }

    #[test]
    fn test_each_open_session_is_released_once() {
        let doc = Document::new();
        let mut v = viewer(&doc, &["a", "b", "c"]);
        for i in 0..3 {
            v.open(i);
            v.next();
            v.close();
            v.close();
        }
        assert_eq!(doc.claims(), 6);
        assert_eq!(doc.releases(), 6);
    }

    #[test]
    fn test_counter() {
        let doc = Document::new();
        let mut v = viewer(&doc, &["a", "b", "c"]);
        assert_eq!(v.counter(), None);
        v.open(1);
        assert_eq!(v.counter().as_deref(), Some("2 / 3"));
    }

    #[test]
    fn test_dispatch_events() {
        let doc = Document::new();
        let mut v = viewer(&doc, &["a", "b", "c"]);
        let events: Vec<Event> = ["open:2", "next", "key:ArrowRight", "image", "key:Escape"]
            .iter()
            .map(|e| e.parse().unwrap())
            .collect();

        v.dispatch(&events[0]);
        v.dispatch(&events[1]);
        assert_eq!(v.current_index(), Some(0));
        v.dispatch(&events[2]);
        v.dispatch(&events[3]);
        assert_eq!(v.current_index(), Some(1));
        v.dispatch(&events[4]);
        assert!(!v.is_open());
        assert!(doc.is_idle());
    }
}
