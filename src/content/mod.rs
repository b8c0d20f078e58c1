//! Content module - gallery manifests and their image descriptors

mod image;
pub mod loader;
mod manifest;

pub use image::ImageDescriptor;
pub use manifest::Manifest;
