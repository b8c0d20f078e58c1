//! Helper functions for templates
//!
//! URL and HTML helpers shared by the view model and the Tera filters.

mod html;
mod url;

pub use html::*;
pub use url::*;
