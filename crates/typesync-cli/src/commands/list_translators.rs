//! List-translators command implementation.

use crate::cli::OutputFormat;
use crate::formatters::format_output;
use crate::manifest::Manifest;
use crate::ExitCode;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use typesync_codegen::Generator;
use typesync_core::GenerationConfig;

/// Translator identifiers in dispatch order.
#[derive(Debug, Serialize)]
pub struct TranslatorList {
    /// Identifiers, extensions first
    pub translators: Vec<String>,
}

impl TranslatorList {
    /// Collects the dispatch order of `generator`.
    #[must_use]
    pub fn of(generator: &Generator<'_>) -> Self {
        Self {
            translators: generator
                .translator_ids()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl fmt::Display for TranslatorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "Translators (dispatch order):".bold())?;
        for (i, id) in self.translators.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {:>2}. {}", i + 1, id.cyan())?;
        }
        Ok(())
    }
}

/// Runs the list-translators command.
///
/// With a manifest, its class map shows up as an extension translator.
pub fn run(manifest: Option<&Path>, output_format: OutputFormat) -> Result<ExitCode> {
    let generator = Generator::new(GenerationConfig::default()).context("failed to set up generator")?;
    let generator = match manifest {
        Some(path) => Manifest::load(path)?.install(generator).0,
        None => generator,
    };

    println!("{}", format_output(&TranslatorList::of(&generator), output_format)?);
    Ok(ExitCode::SUCCESS)
}
