//! Output formatters for CLI commands.
//!
//! Provides consistent formatting across commands for JSON and pretty
//! output modes.

use crate::cli::OutputFormat;
use anyhow::Result;
use serde::Serialize;
use std::fmt::Display;

/// Format data according to the specified output format.
///
/// Pretty output uses the type's `Display` implementation, JSON output its
/// `Serialize` implementation.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use serde::Serialize;
/// use std::fmt;
/// use typesync_cli::OutputFormat;
/// use typesync_cli::formatters::format_output;
///
/// #[derive(Serialize)]
/// struct Count {
///     files: usize,
/// }
///
/// impl fmt::Display for Count {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{} files", self.files)
///     }
/// }
///
/// let output = format_output(&Count { files: 2 }, OutputFormat::Json)?;
/// assert!(output.contains("\"files\": 2"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize + Display>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Pretty => Ok(data.to_string()),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON.
    ///
    /// Uses pretty-printing with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let json = serde_json::to_string_pretty(data)?;
        Ok(json)
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use colored::Colorize;
    use typesync_core::{Diagnostic, Severity};

    /// Formats one diagnostic as a colorized line.
    #[must_use]
    pub fn diagnostic(diagnostic: &Diagnostic) -> String {
        let severity = match diagnostic.severity {
            Severity::Fatal => "fatal".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue(),
        };
        format!(
            "{severity}[{}] {}: {}",
            diagnostic.code.as_str().dimmed(),
            diagnostic.subject.bold(),
            diagnostic.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typesync_core::{Diagnostic, DiagnosticCode};

    #[test]
    fn test_pretty_diagnostic_without_colors() {
        colored::control::set_override(false);
        let line = pretty::diagnostic(&Diagnostic::warning(
            DiagnosticCode::UnsupportedType,
            "decimal.Decimal",
            "no translator matched, defaulting to 'any'",
        ));
        assert_eq!(
            line,
            "warning[unsupported-type] decimal.Decimal: no translator matched, defaulting to 'any'"
        );
    }

    #[test]
    fn test_json_diagnostic_uses_stable_codes() {
        let out = json::format(&Diagnostic::fatal(DiagnosticCode::AmbiguousPath, "users_detail", "x"))
            .unwrap();
        assert!(out.contains("\"code\": \"ambiguous-path\""));
        assert!(out.contains("\"severity\": \"fatal\""));
    }
}
