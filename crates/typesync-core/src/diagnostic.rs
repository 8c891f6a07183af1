//! Structured diagnostics collected during a generation run.
//!
//! A diagnostic records a non-ideal condition together with its severity,
//! a stable machine-readable code, and the endpoint or raw type it concerns.
//!
//! # Examples
//!
//! ```
//! use typesync_core::{Diagnostic, DiagnosticCode, Diagnostics, Severity};
//!
//! let mut diagnostics = Diagnostics::new();
//! diagnostics.push(Diagnostic::warning(
//!     DiagnosticCode::UnsupportedType,
//!     "decimal.Decimal",
//!     "no translator matched, defaulting to 'any'",
//! ));
//!
//! assert_eq!(diagnostics.count(Severity::Warning), 1);
//! assert!(!diagnostics.has_fatal());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The endpoint the diagnostic refers to was not emitted.
    Fatal,
    /// Output was produced but degraded.
    Warning,
    /// Informational only.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fatal => "fatal",
            Self::Warning => "warning",
            Self::Info => "info",
        })
    }
}

/// Stable diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// No translator matched a raw shape.
    UnsupportedType,
    /// Path placeholders and declared arguments disagree.
    AmbiguousPath,
    /// More than one extension translator matched the same shape.
    TranslatorConflict,
    /// A reference without a declared alias reached the emitter.
    AliasCycleUnresolved,
    /// A path converter is not in the built-in table.
    UnknownConverter,
    /// A container received the wrong number of type arguments.
    InvalidArity,
    /// Expansion of generic aliases exceeded the configured depth.
    DepthExceeded,
    /// A named type is not present in the type definitions.
    UnresolvedDefinition,
    /// An endpoint was deliberately left out of the output.
    EndpointSkipped,
    /// Two endpoints derive the same generated name.
    DuplicateName,
    /// A path pattern could not be parsed.
    InvalidPattern,
}

impl DiagnosticCode {
    /// Returns the stable kebab-case identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use typesync_core::DiagnosticCode;
    ///
    /// assert_eq!(DiagnosticCode::AmbiguousPath.as_str(), "ambiguous-path");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnsupportedType => "unsupported-type",
            Self::AmbiguousPath => "ambiguous-path",
            Self::TranslatorConflict => "translator-conflict",
            Self::AliasCycleUnresolved => "alias-cycle-unresolved",
            Self::UnknownConverter => "unknown-converter",
            Self::InvalidArity => "invalid-arity",
            Self::DepthExceeded => "depth-exceeded",
            Self::UnresolvedDefinition => "unresolved-definition",
            Self::EndpointSkipped => "endpoint-skipped",
            Self::DuplicateName => "duplicate-name",
            Self::InvalidPattern => "invalid-pattern",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single structured diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity of the condition
    pub severity: Severity,
    /// Stable code
    pub code: DiagnosticCode,
    /// Offending endpoint name or raw type identity
    pub subject: String,
    /// Human-readable explanation
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic with an explicit severity.
    #[must_use]
    pub fn new(
        severity: Severity,
        code: DiagnosticCode,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Creates an endpoint-fatal diagnostic.
    #[must_use]
    pub fn fatal(code: DiagnosticCode, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, code, subject, message)
    }

    /// Creates a warning diagnostic.
    #[must_use]
    pub fn warning(
        code: DiagnosticCode,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, code, subject, message)
    }

    /// Creates an informational diagnostic.
    #[must_use]
    pub fn info(code: DiagnosticCode, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, code, subject, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.severity, self.code, self.subject, self.message
        )
    }
}

/// Ordered collection of diagnostics for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// Creates an empty collection.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a diagnostic, mirroring it to the log.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Fatal => tracing::error!(
                code = diagnostic.code.as_str(),
                subject = %diagnostic.subject,
                "{}",
                diagnostic.message
            ),
            Severity::Warning => tracing::warn!(
                code = diagnostic.code.as_str(),
                subject = %diagnostic.subject,
                "{}",
                diagnostic.message
            ),
            Severity::Info => tracing::info!(
                code = diagnostic.code.as_str(),
                subject = %diagnostic.subject,
                "{}",
                diagnostic.message
            ),
        }
        self.0.push(diagnostic);
    }

    /// Returns `true` if any endpoint was dropped by a fatal diagnostic.
    #[must_use]
    pub fn has_fatal(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Fatal)
    }

    /// Number of diagnostics with the given severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.0.iter().filter(|d| d.severity == severity).count()
    }

    /// Diagnostics carrying the given code.
    pub fn with_code(&self, code: DiagnosticCode) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(move |d| d.code == code)
    }

    /// Iterates in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    /// Number of diagnostics.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing was reported.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the collection.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        for diagnostic in iter {
            self.push(diagnostic);
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
