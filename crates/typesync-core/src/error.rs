//! Error types for typesync.
//!
//! Only conditions that stop a unit of work are errors. Everything the
//! generator can degrade around (unsupported shapes, translator conflicts,
//! unknown converters) is reported as a [`Diagnostic`](crate::Diagnostic)
//! instead.
//!
//! # Examples
//!
//! ```
//! use typesync_core::{Error, Result};
//!
//! fn check_module_name(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "module name cannot be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_module_name("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use thiserror::Error;

/// Main error type for typesync.
///
/// All errors in the system use this type, providing consistent error handling
/// across all crates in the workspace.
#[derive(Error, Debug)]
pub enum Error {
    /// Path placeholders and declared arguments disagree.
    ///
    /// Fatal for the offending endpoint only; the generator reports it as a
    /// diagnostic and moves on to the next endpoint.
    #[error("Ambiguous path for endpoint '{endpoint}': {reason}")]
    AmbiguousPath {
        /// Derived name of the endpoint
        endpoint: String,
        /// Which placeholders or arguments are unmatched
        reason: String,
    },

    /// A reference points at an alias that was never declared.
    ///
    /// Indicates a bug in the type graph builder rather than bad input, and
    /// aborts the whole run.
    #[error("Reference to undeclared alias '{alias}'")]
    AliasCycleUnresolved {
        /// Name carried by the dangling reference
        alias: String,
    },

    /// Strict mode is enabled and at least one type could not be translated.
    #[error("Strict mode: {unknown_count} type(s) could not be translated")]
    StrictModeViolation {
        /// Number of `Unknown` nodes produced during the run
        unknown_count: usize,
    },

    /// Configuration error.
    ///
    /// Raised when configuration is invalid, missing required fields,
    /// or contains contradictory settings.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Template registration or rendering failed.
    #[error("Template error: {message}")]
    TemplateError {
        /// Description of the template failure
        message: String,
        /// Underlying template engine error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization error.
    ///
    /// Raised when JSON or other data format conversion fails.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A descriptor is structurally invalid (e.g. a malformed path pattern).
    #[error("Invalid descriptor '{subject}': {reason}")]
    InvalidDescriptor {
        /// The endpoint or type the descriptor belongs to
        subject: String,
        /// What is wrong with it
        reason: String,
    },
}

impl Error {
    /// Returns `true` if this is an ambiguous path error.
    ///
    /// # Examples
    ///
    /// ```
    /// use typesync_core::Error;
    ///
    /// let err = Error::AmbiguousPath {
    ///     endpoint: "users_detail".to_string(),
    ///     reason: "placeholder 'id' has no declared argument".to_string(),
    /// };
    /// assert!(err.is_ambiguous_path());
    /// ```
    #[must_use]
    pub const fn is_ambiguous_path(&self) -> bool {
        matches!(self, Self::AmbiguousPath { .. })
    }

    /// Returns `true` if this is an unresolved alias error.
    #[must_use]
    pub const fn is_alias_cycle_unresolved(&self) -> bool {
        matches!(self, Self::AliasCycleUnresolved { .. })
    }

    /// Returns `true` if this is a strict mode violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use typesync_core::Error;
    ///
    /// let err = Error::StrictModeViolation { unknown_count: 2 };
    /// assert!(err.is_strict_mode_violation());
    /// assert!(err.to_string().contains('2'));
    /// ```
    #[must_use]
    pub const fn is_strict_mode_violation(&self) -> bool {
        matches!(self, Self::StrictModeViolation { .. })
    }

    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use typesync_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "Invalid naming format".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a template error.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::TemplateError { .. })
    }

    /// Returns `true` if this is an invalid descriptor error.
    #[must_use]
    pub const fn is_invalid_descriptor(&self) -> bool {
        matches!(self, Self::InvalidDescriptor { .. })
    }

    /// Returns `true` if the error aborts a whole run rather than one endpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use typesync_core::Error;
    ///
    /// let per_endpoint = Error::AmbiguousPath {
    ///     endpoint: "main".to_string(),
    ///     reason: String::new(),
    /// };
    /// assert!(!per_endpoint.is_run_level());
    ///
    /// let run = Error::AliasCycleUnresolved { alias: "Tree".to_string() };
    /// assert!(run.is_run_level());
    /// ```
    #[must_use]
    pub const fn is_run_level(&self) -> bool {
        !matches!(
            self,
            Self::AmbiguousPath { .. } | Self::InvalidDescriptor { .. }
        )
    }
}

/// Result type alias for typesync operations.
///
/// This is a convenience alias for `Result<T, Error>` used throughout
/// the codebase.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_path_detection() {
        let err = Error::AmbiguousPath {
            endpoint: "with_args".to_string(),
            reason: "argument 'x' does not appear in the path".to_string(),
        };
        assert!(err.is_ambiguous_path());
        assert!(!err.is_config_error());
        assert!(!err.is_run_level());
    }

    #[test]
    fn test_alias_cycle_detection() {
        let err = Error::AliasCycleUnresolved {
            alias: "SelfRef".to_string(),
        };
        assert!(err.is_alias_cycle_unresolved());
        assert!(err.is_run_level());
    }

    #[test]
    fn test_invalid_descriptor_is_endpoint_level() {
        let err = Error::InvalidDescriptor {
            subject: "/broken/<".to_string(),
            reason: "unterminated placeholder".to_string(),
        };
        assert!(err.is_invalid_descriptor());
        assert!(!err.is_run_level());
    }

    #[test]
    fn test_template_error_source() {
        let err = Error::TemplateError {
            message: "render failed".to_string(),
            source: Some("missing variable".into()),
        };
        assert!(err.is_template_error());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_display() {
        let err = Error::AmbiguousPath {
            endpoint: "main".to_string(),
            reason: "placeholder 'id' has no declared argument".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("Ambiguous path"));
        assert!(display.contains("main"));
        assert!(display.contains("'id'"));
    }

    #[test]
    fn test_result_alias() {
        #[allow(clippy::unnecessary_wraps)]
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(Error::ConfigError {
                message: "test error".to_string(),
            })
        }

        assert_eq!(returns_ok().unwrap(), 42);
        assert!(returns_err().is_err());
    }
}
