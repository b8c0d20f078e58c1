//! Configuration module

mod site;

pub use site::GalleryConfig;
pub use site::SiteConfig;
pub use site::Transform;
