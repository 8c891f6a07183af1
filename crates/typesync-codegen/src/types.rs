//! Output types of a generation run.
//!
//! # Examples
//!
//! ```
//! use typesync_codegen::{GeneratedCode, GeneratedFile};
//!
//! let mut code = GeneratedCode::new();
//! code.add_file(GeneratedFile {
//!     path: "types.ts".to_string(),
//!     content: "export type MainReturnType = number;\n".to_string(),
//! });
//!
//! assert_eq!(code.file_count(), 1);
//! assert!(code.get("types.ts").is_some());
//! ```

use crate::graph::FrozenAliases;
use serde::{Deserialize, Serialize};
use typesync_core::{Diagnostics, EndpointName};

/// All files produced by one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Generated files with paths relative to the output directory
    pub files: Vec<GeneratedFile>,
}

impl GeneratedCode {
    /// Creates an empty container.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Adds a generated file.
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Number of generated files.
    #[inline]
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Iterates over the files in generation order.
    #[inline]
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    /// Looks up a file by relative path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

/// A single generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Path relative to the output directory
    pub path: String,
    /// File content
    pub content: String,
}

/// Result of a successful [`Generator::run`](crate::Generator::run).
///
/// A run succeeds even when some endpoints were dropped; check
/// [`Diagnostics::has_fatal`] to find out whether everything was emitted.
#[derive(Debug, Clone)]
pub struct Generation {
    /// The types and requests modules
    pub code: GeneratedCode,
    /// Everything reported during the run, in order
    pub diagnostics: Diagnostics,
    /// Alias declarations emitted into the types module
    pub aliases: FrozenAliases,
    /// Endpoints present in the output, in input order
    pub emitted: Vec<EndpointName>,
}

impl Generation {
    /// Content of the types module.
    #[must_use]
    pub fn types(&self) -> &str {
        self.code.files.first().map_or("", |f| f.content.as_str())
    }

    /// Content of the request helpers module.
    #[must_use]
    pub fn requests(&self) -> &str {
        self.code.files.get(1).map_or("", |f| f.content.as_str())
    }
}
