//! Endpoint manifest loading.
//!
//! The manifest is the JSON document an upstream extractor writes after
//! walking the application's route table:
//!
//! ```json
//! {
//!   "definitions": { "SelfRef": { "kind": "alias", "value": { "kind": "tuple", "args": [] } } },
//!   "converters": { "date": { "kind": "str" } },
//!   "class_map": { "datetime.datetime": { "kind": "str" } },
//!   "endpoints": [{ "endpoint": "main", "path": "/", "returns": { "kind": "int" } }]
//! }
//! ```
//!
//! Every key is optional.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use typesync_codegen::Generator;
use typesync_codegen::translate::ClassMapTranslator;
use typesync_core::{Endpoint, RawType, TypeDefinitions};

/// Parsed endpoint manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Named type declarations referenced by `named` descriptors
    pub definitions: TypeDefinitions,
    /// Custom path converters and the raw type each one produces
    pub converters: IndexMap<String, RawType>,
    /// Opaque class paths and their replacement types
    pub class_map: HashMap<String, RawType>,
    /// Endpoints in route-table order
    pub endpoints: Vec<Endpoint>,
}

impl Manifest {
    /// Parses a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid manifest.
    ///
    /// # Examples
    ///
    /// ```
    /// use typesync_cli::manifest::Manifest;
    ///
    /// let manifest = Manifest::from_json(r#"{"endpoints": [{"endpoint": "main", "path": "/"}]}"#).unwrap();
    /// assert_eq!(manifest.endpoints.len(), 1);
    /// assert!(manifest.definitions.is_empty());
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid endpoint manifest")
    }

    /// Reads and parses a manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        let manifest = Self::from_json(&text)
            .with_context(|| format!("failed to parse manifest {}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            endpoints = manifest.endpoints.len(),
            definitions = manifest.definitions.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    /// Hands the manifest's declarations, converters and class map to
    /// `generator`, returning the endpoints to run.
    #[must_use]
    pub fn install(self, generator: Generator<'_>) -> (Generator<'_>, Vec<Endpoint>) {
        let mut generator = generator.with_definitions(self.definitions);
        for (name, raw) in self.converters {
            generator.register_converter(name, raw);
        }
        if !self.class_map.is_empty() {
            generator.register_translator(ClassMapTranslator::new(self.class_map));
        }
        (generator, self.endpoints)
    }
}
