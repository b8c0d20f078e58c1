//! Lightbox state machine

use serde::Serialize;

/// Whether the lightbox is shown, and which image it shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewerState {
    #[default]
    Closed,
    Open {
        index: usize,
    },
}

impl ViewerState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn current_index(&self) -> Option<usize> {
        match self {
            Self::Open { index } => Some(*index),
            Self::Closed => None,
        }
    }

    /// Open at `index`; out-of-range indices leave the state untouched
    pub fn open(self, index: usize, len: usize) -> Self {
        if index < len {
            Self::Open { index }
        } else {
            self
        }
    }

    /// Advance with wraparound; no-op when closed or with a single image
    pub fn next(self, len: usize) -> Self {
        match self {
            Self::Open { index } if len > 1 => Self::Open {
                index: (index + 1) % len,
            },
            other => other,
        }
    }

    /// Step back with wraparound; no-op when closed or with a single image
    pub fn previous(self, len: usize) -> Self {
        match self {
            Self::Open { index } if len > 1 => Self::Open {
                index: (index + len - 1) % len,
            },
            other => other,
        }
    }

    pub fn close(self) -> Self {
        Self::Closed
    }
}
