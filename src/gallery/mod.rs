//! Filtered, immutable image sequences

use serde::Serialize;

use crate::content::ImageDescriptor;

/// An image that survived filtering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub url: String,
    pub preview_url: String,
}

/// Ordered image sequence, fixed at construction
///
/// Identity is position: two entries may share a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    images: Vec<Image>,
}

impl Gallery {
    /// Build a gallery, dropping candidates without a usable preview URL
    pub fn new<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = ImageDescriptor>,
    {
        let images = candidates
            .into_iter()
            .filter_map(|candidate| {
                let preview_url = candidate.usable_preview()?.to_string();
                Some(Image {
                    url: candidate.url,
                    preview_url,
                })
            })
            .collect();

        Self { images }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Image> {
        self.images.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Image> {
        self.images.iter()
    }

    /// Whether previous/next controls make sense
    pub fn has_navigation(&self) -> bool {
        self.images.len() > 1
    }

    /// Index after `index`, wrapping to the first image
    pub fn next_index(&self, index: usize) -> usize {
        match self.images.len() {
            0 => 0,
            n => (index + 1) % n,
        }
    }

    /// Index before `index`, wrapping to the last image
    pub fn previous_index(&self, index: usize) -> usize {
        match self.images.len() {
            0 => 0,
            n => (index % n + n - 1) % n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<ImageDescriptor> {
        vec![
            ImageDescriptor::new("a.jpg", "https://imgix.net/a.jpg"),
            ImageDescriptor {
                url: "b.jpg".to_string(),
                preview_url: None,
            },
            ImageDescriptor::new("c.jpg", ""),
            ImageDescriptor::new("a.jpg", "https://imgix.net/a.jpg"),
        ]
    }

    #[test]
    fn test_filters_unusable_entries_in_order() {
        let gallery = Gallery::new(candidates());
        assert_eq!(gallery.len(), 2);
        // Duplicates by URL are kept
        assert_eq!(gallery.get(0), gallery.get(1));
        assert_eq!(gallery.get(0).unwrap().url, "a.jpg");
    }

    #[test]
    fn test_preview_is_trimmed() {
        let gallery = Gallery::new(vec![ImageDescriptor::new("a.jpg", " https://x/a.jpg ")]);
        assert_eq!(gallery.get(0).unwrap().preview_url, "https://x/a.jpg");
    }

    #[test]
    fn test_empty_after_filtering() {
        let gallery = Gallery::new(vec![ImageDescriptor::new("a.jpg", "  ")]);
        assert!(gallery.is_empty());
        assert!(!gallery.has_navigation());
    }

    #[test]
    fn test_wrapping_indices() {
        let gallery = Gallery::new(vec![
            ImageDescriptor::new("a", "a"),
            ImageDescriptor::new("b", "b"),
            ImageDescriptor::new("c", "c"),
        ]);
        assert_eq!(gallery.next_index(0), 1);
        assert_eq!(gallery.next_index(2), 0);
        assert_eq!(gallery.previous_index(0), 2);
        assert_eq!(gallery.previous_index(1), 0);
    }

    #[test]
    fn test_next_cycles_back_for_every_size() {
        for n in 1..=7 {
            let gallery = Gallery::new((0..n).map(|i| ImageDescriptor::new(i.to_string(), "p")));
            for start in 0..n {
                let mut index = start;
                for _ in 0..n {
                    index = gallery.next_index(index);
                }
                assert_eq!(index, start, "n={} start={}", n, start);
                assert_eq!(gallery.previous_index(gallery.next_index(start)), start);
            }
        }
    }
}
