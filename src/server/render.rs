//! HTML rendering through Tera
//!
//! Templates are compiled into the binary and registered under `.html`
//! names, so every interpolated value is HTML-escaped.

use crate::core::error::RenderError;
use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("navbar.html", include_str!("../../templates/navbar.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("vehicles.html", include_str!("../../templates/vehicles.html")),
    (
        "vehicle_detail.html",
        include_str!("../../templates/vehicle_detail.html"),
    ),
    (
        "vehicle_not_found.html",
        include_str!("../../templates/vehicle_not_found.html"),
    ),
    ("store.html", include_str!("../../templates/store.html")),
    (
        "product_detail.html",
        include_str!("../../templates/product_detail.html"),
    ),
    (
        "product_not_found.html",
        include_str!("../../templates/product_not_found.html"),
    ),
    ("error.html", include_str!("../../templates/error.html")),
];

/// The compiled template set
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Compile the embedded templates
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())
            .map_err(|e| template_error("<embedded>", &e))?;
        Ok(Self { tera })
    }

    /// Render a page from any serializable view model
    pub fn render<T: Serialize>(
        &self,
        template: &str,
        page: &T,
    ) -> Result<Html<String>, RenderError> {
        let context =
            Context::from_serialize(page).map_err(|e| template_error(template, &e))?;
        self.tera
            .render(template, &context)
            .map(Html)
            .map_err(|e| template_error(template, &e))
    }

    /// Names of every registered template
    pub fn names(&self) -> Vec<&str> {
        self.tera.get_template_names().collect()
    }
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates")
            .field("templates", &self.names())
            .finish()
    }
}

/// Tera reports the useful part of a failure in the source chain
fn template_error(template: &str, err: &tera::Error) -> RenderError {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    RenderError::Template {
        template: template.to_string(),
        message,
    }
}
