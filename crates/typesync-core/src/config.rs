//! Configuration for a generation run.
//!
//! All values are pre-resolved: the engine never reads files or parses
//! command lines itself. The type derives `Deserialize` so front ends can
//! load it from TOML or JSON.
//!
//! # Examples
//!
//! ```
//! use typesync_core::{AliasNaming, GenerationConfig};
//!
//! // Use default configuration
//! let config = GenerationConfig::default();
//! assert_eq!(config.types_module, "types.ts");
//! assert!(!config.strict);
//!
//! // Create custom configuration
//! let custom = GenerationConfig::builder()
//!     .strict(true)
//!     .alias_naming(AliasNaming::Sequential { prefix: "Rec".to_string() })
//!     .build();
//! assert!(custom.validate().is_ok());
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// How names are chosen for aliases that break self-reference.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum AliasNaming {
    /// PascalCase of the declared name followed by its generic arguments,
    /// e.g. `Tree[int]` becomes `TreeInt`
    #[default]
    Declared,
    /// `<prefix>1`, `<prefix>2`, ... in discovery order
    Sequential {
        /// Name prefix
        #[serde(default = "default_alias_prefix")]
        prefix: String,
    },
}

fn default_alias_prefix() -> String {
    "Alias".to_string()
}

/// Handlebars format strings for generated identifiers.
///
/// Type formats receive `d` (derived name), `cc` (camelCase), `pc`
/// (PascalCase), `sc` (snake_case), `uc` (UPPERCASE) and `lc` (lowercase).
/// The function format receives the same keys prefixed with `r_` for the
/// route and `m_` for the HTTP method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingFormats {
    /// Name of the Args declaration. Default: `{{pc}}ArgsType`
    pub args_type: String,
    /// Name of the Return declaration. Default: `{{pc}}ReturnType`
    pub return_type: String,
    /// Name of each request function. Default: `{{m_lc}}{{r_pc}}`
    pub function: String,
}

impl Default for NamingFormats {
    fn default() -> Self {
        Self {
            args_type: "{{pc}}ArgsType".to_string(),
            return_type: "{{pc}}ReturnType".to_string(),
            function: "{{m_lc}}{{r_pc}}".to_string(),
        }
    }
}

/// Configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Alias naming strategy.
    ///
    /// Default: `Declared`
    pub alias_naming: AliasNaming,

    /// Abort the run after the full pass if any type degraded to `Unknown`.
    ///
    /// Default: false
    pub strict: bool,

    /// File name of the types artifact.
    ///
    /// Default: `types.ts`
    pub types_module: String,

    /// File name of the request helpers artifact.
    ///
    /// Default: `apis.ts`
    pub requests_module: String,

    /// Prefix joined onto every generated URL.
    ///
    /// Default: empty
    pub base_url: String,

    /// Identifier formats.
    pub naming: NamingFormats,

    /// Skip endpoints without a return annotation instead of typing their
    /// response as `any`.
    ///
    /// Default: true
    pub skip_unannotated: bool,

    /// Emit endpoints marked internal.
    ///
    /// Default: false
    pub include_internal: bool,

    /// Maximum nesting of generic alias expansion before giving up on a
    /// branch.
    ///
    /// Default: 64
    pub max_depth: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            alias_naming: AliasNaming::default(),
            strict: false,
            types_module: "types.ts".to_string(),
            requests_module: "apis.ts".to_string(),
            base_url: String::new(),
            naming: NamingFormats::default(),
            skip_unannotated: true,
            include_internal: false,
            max_depth: 64,
        }
    }
}

impl GenerationConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::new()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if:
    /// - A module name is empty, or both modules share a name
    /// - A naming format is empty
    /// - `max_depth` is zero
    /// - A sequential alias prefix is not a valid identifier start
    ///
    /// # Examples
    ///
    /// ```
    /// use typesync_core::GenerationConfig;
    ///
    /// let config = GenerationConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// let mut invalid = GenerationConfig::default();
    /// invalid.requests_module = invalid.types_module.clone();
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let fail = |message: String| Err(Error::ConfigError { message });

        if self.types_module.trim().is_empty() || self.requests_module.trim().is_empty() {
            return fail("module names cannot be empty".to_string());
        }
        if self.types_module == self.requests_module {
            return fail(format!(
                "types and requests modules must differ (both '{}')",
                self.types_module
            ));
        }
        for (label, format) in [
            ("args type", &self.naming.args_type),
            ("return type", &self.naming.return_type),
            ("function", &self.naming.function),
        ] {
            if format.trim().is_empty() {
                return fail(format!("{label} name format cannot be empty"));
            }
        }
        if self.max_depth == 0 {
            return fail("max_depth must be greater than zero".to_string());
        }
        if let AliasNaming::Sequential { prefix } = &self.alias_naming
            && !prefix
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        {
            return fail(format!("alias prefix '{prefix}' is not a valid identifier start"));
        }

        Ok(())
    }

    /// Module specifier the requests module uses to import the types module.
    ///
    /// # Examples
    ///
    /// ```
    /// use typesync_core::GenerationConfig;
    ///
    /// assert_eq!(GenerationConfig::default().types_import_path(), "./types");
    /// ```
    #[must_use]
    pub fn types_import_path(&self) -> String {
        let stem = self
            .types_module
            .strip_suffix(".ts")
            .unwrap_or(&self.types_module);
        format!("./{stem}")
    }
}

/// Builder for [`GenerationConfig`].
#[derive(Debug, Clone, Default)]
pub struct GenerationConfigBuilder {
    config: GenerationConfig,
}

impl GenerationConfigBuilder {
    /// Starts from the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the alias naming strategy.
    #[must_use]
    pub fn alias_naming(mut self, naming: AliasNaming) -> Self {
        self.config.alias_naming = naming;
        self
    }

    /// Enables or disables strict mode.
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Sets the types module file name.
    #[must_use]
    pub fn types_module(mut self, name: impl Into<String>) -> Self {
        self.config.types_module = name.into();
        self
    }

    /// Sets the requests module file name.
    #[must_use]
    pub fn requests_module(mut self, name: impl Into<String>) -> Self {
        self.config.requests_module = name.into();
        self
    }

    /// Sets the URL prefix.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Sets the identifier formats.
    #[must_use]
    pub fn naming(mut self, naming: NamingFormats) -> Self {
        self.config.naming = naming;
        self
    }

    /// Sets whether unannotated endpoints are skipped.
    #[must_use]
    pub const fn skip_unannotated(mut self, skip: bool) -> Self {
        self.config.skip_unannotated = skip;
        self
    }

    /// Sets whether internal endpoints are emitted.
    #[must_use]
    pub const fn include_internal(mut self, include: bool) -> Self {
        self.config.include_internal = include;
        self
    }

    /// Sets the alias expansion depth limit.
    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Finishes the configuration.
    #[must_use]
    pub fn build(self) -> GenerationConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        assert!(GenerationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = GenerationConfig::builder()
            .strict(true)
            .base_url("/api")
            .types_module("models.ts")
            .requests_module("client.ts")
            .include_internal(true)
            .skip_unannotated(false)
            .max_depth(8)
            .build();

        assert!(config.strict);
        assert_eq!(config.base_url, "/api");
        assert_eq!(config.types_import_path(), "./models");
        assert!(config.include_internal);
        assert!(!config.skip_unannotated);
        assert_eq!(config.max_depth, 8);
    }

    #[test]
    fn test_validate_rejects_zero_depth() {
        let config = GenerationConfig::builder().max_depth(0).build();
        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_validate_rejects_empty_format() {
        let config = GenerationConfig::builder()
            .naming(NamingFormats {
                function: "  ".to_string(),
                ..NamingFormats::default()
            })
            .build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_prefix() {
        let config = GenerationConfig::builder()
            .alias_naming(AliasNaming::Sequential {
                prefix: "9x".to_string(),
            })
            .build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_types_import_path_without_extension() {
        let config = GenerationConfig::builder().types_module("shapes").build();
        assert_eq!(config.types_import_path(), "./shapes");
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: GenerationConfig = serde_json::from_str(
            r#"{"strict": true, "alias_naming": {"strategy": "sequential"}}"#,
        )
        .unwrap();
        assert!(config.strict);
        assert_eq!(
            config.alias_naming,
            AliasNaming::Sequential {
                prefix: "Alias".to_string()
            }
        );
        assert_eq!(config.requests_module, "apis.ts");
    }
}
