//! User input: keys, click targets and replayable events

use std::fmt;
use std::str::FromStr;

use crate::error::GalleryError;

/// A key press, named the way browsers report `KeyboardEvent.key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other(String),
}

impl Key {
    /// Parse a key name; anything unrecognized becomes [`Key::Other`]
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArrowLeft => write!(f, "ArrowLeft"),
            Self::ArrowRight => write!(f, "ArrowRight"),
            Self::Escape => write!(f, "Escape"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}

/// What the key handler did with a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The viewer acted on the key
    pub handled: bool,
    /// The page's default action (e.g. scrolling) must be suppressed
    pub prevent_default: bool,
}

impl KeyOutcome {
    pub const IGNORED: Self = Self {
        handled: false,
        prevent_default: false,
    };
}

/// Elements of the gallery that react to clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Grid thumbnail at the given position
    Thumbnail(usize),
    /// The explicit close control
    CloseButton,
    /// The modal background around the image
    Backdrop,
    /// The displayed image itself
    Image,
    PreviousButton,
    NextButton,
}

/// A single step of a scripted interaction
///
/// Textual forms: `open:<i>`, `next`, `prev`, `close`, `backdrop`, `image`,
/// `key:<Name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Click(ClickTarget),
    Key(Key),
}

impl FromStr for Event {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || GalleryError::UnknownEvent(s.to_string());

        if let Some(index) = s.strip_prefix("open:") {
            let index = index.trim().parse().map_err(|_| unknown())?;
            return Ok(Self::Click(ClickTarget::Thumbnail(index)));
        }

        if let Some(name) = s.strip_prefix("key:") {
            let name = name.trim();
            if name.is_empty() {
                return Err(unknown());
            }
            return Ok(Self::Key(Key::from_name(name)));
        }

        match s {
            "next" => Ok(Self::Click(ClickTarget::NextButton)),
            "prev" | "previous" => Ok(Self::Click(ClickTarget::PreviousButton)),
            "close" => Ok(Self::Click(ClickTarget::CloseButton)),
            "backdrop" => Ok(Self::Click(ClickTarget::Backdrop)),
            "image" => Ok(Self::Click(ClickTarget::Image)),
            _ => Err(unknown()),
        }
    }
}
