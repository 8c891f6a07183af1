//! Template engine for code generation using Handlebars.
//!
//! Wraps Handlebars with the two artifact templates pre-registered and
//! renders the user-supplied naming format strings.
//!
//! # Examples
//!
//! ```
//! use typesync_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let name = engine.render_format("{{pc}}ArgsType", &json!({"pc": "Main"})).unwrap();
//! assert_eq!(name, "MainArgsType");
//! ```

use handlebars::{Handlebars, no_escape};
use serde::Serialize;
use typesync_core::{Error, Result};

/// Name of the types artifact template.
pub const TYPES_TEMPLATE: &str = "types";
/// Name of the request helpers artifact template.
pub const REQUESTS_TEMPLATE: &str = "requests";

/// Template engine for code generation.
///
/// Output is TypeScript, so HTML escaping is disabled and strict mode makes
/// a missing variable an error rather than an empty string.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates a new template engine with the artifact templates registered.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails (should not happen
    /// with valid built-in templates).
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(no_escape);

        let mut engine = Self { handlebars };
        engine.register_template_string(TYPES_TEMPLATE, include_str!("../templates/types.ts.hbs"))?;
        engine.register_template_string(
            REQUESTS_TEMPLATE,
            include_str!("../templates/requests.ts.hbs"),
        )?;

        Ok(engine)
    }

    /// Renders a registered template with the given context.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Template name is not registered
    /// - Context cannot be serialized
    /// - Template rendering fails
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::TemplateError {
                message: format!("rendering '{template_name}' failed: {e}"),
                source: Some(Box::new(e)),
            })
    }

    /// Renders a one-off format string, such as a naming format.
    ///
    /// # Errors
    ///
    /// Returns error if the format does not parse or references a
    /// placeholder missing from `data`.
    pub fn render_format<T: Serialize>(&self, format: &str, data: &T) -> Result<String> {
        self.handlebars
            .render_template(format, data)
            .map_err(|e| Error::TemplateError {
                message: format!("format '{format}' failed: {e}"),
                source: Some(Box::new(e)),
            })
    }

    /// Registers a custom template, replacing a built-in one of that name.
    ///
    /// # Errors
    ///
    /// Returns error if template string is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use typesync_codegen::template_engine::TemplateEngine;
    ///
    /// let mut engine = TemplateEngine::new().unwrap();
    /// engine.register_template_string("banner", "// {{name}}").unwrap();
    /// ```
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::TemplateError {
                message: format!("failed to register template '{name}': {e}"),
                source: Some(Box::new(e)),
            })
    }
}
