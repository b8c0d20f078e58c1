//! Page-wide shared resources
//!
//! A [`Document`] owns the two pieces of global page state a lightbox
//! touches: the scroll-disable flag and the key listener registry. Both are
//! handed out as guards that give the resource back when dropped, so a
//! viewer that is closed, or torn down while open, always releases what it
//! claimed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Identifier of a registered key listener
pub type ListenerId = u64;

#[derive(Debug, Default)]
struct DocumentInner {
    scroll_locks: Cell<usize>,
    listeners: RefCell<Vec<ListenerId>>,
    next_listener: Cell<ListenerId>,
    claims: Cell<usize>,
    releases: Cell<usize>,
}

impl DocumentInner {
    fn claim(&self) {
        self.claims.set(self.claims.get() + 1);
    }

    fn release(&self) {
        self.releases.set(self.releases.get() + 1);
    }
}

/// Handle to the page's shared state
///
/// Cloning yields another handle to the same page.
#[derive(Debug, Clone, Default)]
pub struct Document {
    inner: Rc<DocumentInner>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable page scrolling until the returned guard is dropped
    ///
    /// Locks nest: the page scrolls again once every guard is gone.
    pub fn lock_scroll(&self) -> ScrollLock {
        let locks = self.inner.scroll_locks.get();
        self.inner.scroll_locks.set(locks + 1);
        self.inner.claim();
        tracing::trace!("Scroll lock acquired ({} held)", locks + 1);
        ScrollLock {
            doc: Rc::clone(&self.inner),
        }
    }

    /// Register a page-wide key listener until the returned handle is dropped
    pub fn add_key_listener(&self) -> KeyListener {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner.listeners.borrow_mut().push(id);
        self.inner.claim();
        tracing::trace!("Key listener {} registered", id);
        KeyListener {
            doc: Rc::clone(&self.inner),
            id,
        }
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.inner.scroll_locks.get() > 0
    }

    pub fn key_listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Inline style for `<body>` reflecting the scroll state
    pub fn body_style(&self) -> Option<&'static str> {
        self.is_scroll_locked().then_some("overflow: hidden")
    }

    /// Total resources ever claimed through this document
    pub fn claims(&self) -> usize {
        self.inner.claims.get()
    }

    /// Total resources ever released back to this document
    pub fn releases(&self) -> usize {
        self.inner.releases.get()
    }

    /// Claims not yet released
    pub fn held(&self) -> usize {
        self.claims() - self.releases()
    }

    /// True when every claim has been released
    pub fn is_idle(&self) -> bool {
        self.held() == 0
    }
}

/// Guard keeping page scrolling disabled
#[derive(Debug)]
#[must_use = "scrolling is re-enabled as soon as the lock is dropped"]
pub struct ScrollLock {
    doc: Rc<DocumentInner>,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        let locks = self.doc.scroll_locks.get().saturating_sub(1);
        self.doc.scroll_locks.set(locks);
        self.doc.release();
        tracing::trace!("Scroll lock released ({} held)", locks);
    }
}

/// Registration of a page-wide key listener
#[derive(Debug)]
#[must_use = "the listener is removed as soon as the handle is dropped"]
pub struct KeyListener {
    doc: Rc<DocumentInner>,
    id: ListenerId,
}

impl KeyListener {
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        self.doc.listeners.borrow_mut().retain(|id| *id != self.id);
        self.doc.release();
        tracing::trace!("Key listener {} removed", self.id);
    }
}
