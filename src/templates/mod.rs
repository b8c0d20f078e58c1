//! Built-in gallery templates using the Tera template engine
//!
//! Templates are embedded in the binary; sites only supply manifests and
//! `_config.yml`.

use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::error::Result;
use crate::helpers;
use crate::page::Document;
use crate::viewer::GalleryView;

/// Template renderer with the embedded gallery theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Escaping is explicit through `escape_attr` so URLs built by the
        // view model pass through untouched
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("gallery/layout.html")),
            ("index.html", include_str!("gallery/index.html")),
            ("gallery.html", include_str!("gallery/gallery.html")),
            (
                "partials/grid.html",
                include_str!("gallery/partials/grid.html"),
            ),
            (
                "partials/lightbox.html",
                include_str!("gallery/partials/lightbox.html"),
            ),
        ])?;

        tera.register_filter("escape_attr", escape_attr_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("json_string", json_string_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render one gallery page for the viewer's current state
    ///
    /// The body style mirrors the document's scroll-lock.
    pub fn render_gallery(&self, page: &GalleryPage, document: &Document) -> Result<String> {
        let mut context = base_context(page.config);
        context.insert("slug", page.slug);
        context.insert("title", page.title);
        context.insert("description", &page.description);
        context.insert("view", page.view);
        context.insert("body_style", &document.body_style());
        self.render("gallery.html", &context)
    }

    /// Render the gallery index
    pub fn render_index(&self, config: &SiteConfig, galleries: &[GalleryLink]) -> Result<String> {
        let mut context = base_context(config);
        context.insert("galleries", galleries);
        context.insert("slug", &None::<&str>);
        context.insert("body_style", &None::<&str>);
        self.render("index.html", &context)
    }
}

fn base_context(config: &SiteConfig) -> Context {
    let mut context = Context::new();
    context.insert("config", &ConfigData::from(config));
    context.insert("columns", &config.gallery.columns.max(1));
    context.insert("version", env!("CARGO_PKG_VERSION"));
    context
}

/// Tera filter: escape HTML special characters
fn escape_attr_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("escape_attr", "value", String, value);
    Ok(tera::Value::String(helpers::html_escape(&s)))
}

/// Tera filter: quote a value for use inside an inline script
fn json_string_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("json_string", "value", String, value);
    Ok(tera::Value::String(helpers::js_string(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    Ok(tera::Value::String(helpers::truncate(&s, length, None)))
}

/// Inputs for one gallery page
pub struct GalleryPage<'a> {
    pub config: &'a SiteConfig,
    pub slug: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub view: &'a GalleryView,
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub language: String,
    pub url: String,
    pub root: String,
}

impl From<&SiteConfig> for ConfigData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            language: config.language.clone(),
            url: config.url.clone(),
            root: config.root.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GalleryLink {
    pub title: String,
    pub href: String,
    pub count: usize,
    pub description: Option<String>,
}
