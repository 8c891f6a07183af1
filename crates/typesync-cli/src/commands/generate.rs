//! Generate command implementation.
//!
//! This command:
//! 1. Resolves the generation settings (config file, then flags)
//! 2. Loads the endpoint manifest
//! 3. Runs the generator
//! 4. Writes the types and request helper modules to the output directory

use crate::cli::{AliasNamingArg, GenerateArgs, OutputFormat};
use crate::formatters::format_output;
use crate::manifest::Manifest;
use crate::ExitCode;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;
use typesync_codegen::{GeneratedCode, Generation, Generator};
use typesync_core::{AliasNaming, Diagnostic, GenerationConfig, Severity};

/// Summary of one generate run.
#[derive(Debug, Serialize)]
pub struct GenerationReport {
    /// Output directory
    pub out_dir: String,
    /// Written files, relative to `out_dir`
    pub files: Vec<String>,
    /// Emitted endpoints
    pub endpoints: Vec<String>,
    /// Declared aliases
    pub aliases: Vec<String>,
    /// Everything the run reported
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationReport {
    /// Builds the report for a finished run.
    #[must_use]
    pub fn new(out_dir: &Path, generation: &Generation) -> Self {
        Self {
            out_dir: out_dir.display().to_string(),
            files: generation.code.files().map(|f| f.path.clone()).collect(),
            endpoints: generation.emitted.iter().map(|n| n.as_str().to_string()).collect(),
            aliases: generation.aliases.iter().map(|(name, _)| name.to_string()).collect(),
            diagnostics: generation.diagnostics.iter().cloned().collect(),
        }
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == severity).count()
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{}", crate::formatters::pretty::diagnostic(diagnostic))?;
        }

        let fatal = self.count(Severity::Fatal);
        let mark = if fatal == 0 { "✓".green() } else { "✗".red() };
        writeln!(
            f,
            "{mark} Generated {} endpoint(s) and {} alias(es) in {}",
            self.endpoints.len(),
            self.aliases.len(),
            self.out_dir.bold()
        )?;
        for file in &self.files {
            writeln!(f, "  {}", file.cyan())?;
        }
        write!(
            f,
            "{} fatal, {} warning(s), {} info",
            fatal,
            self.count(Severity::Warning),
            self.count(Severity::Info)
        )
    }
}

/// Resolves generation settings: the `--config` file if given, else
/// defaults, with command-line flags applied on top.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed.
///
/// # Examples
///
/// ```
/// use typesync_cli::GenerateArgs;
/// use typesync_cli::commands::generate::resolve_config;
///
/// let args = GenerateArgs {
///     base_url: Some("/api".to_string()),
///     strict: true,
///     ..Default::default()
/// };
/// let config = resolve_config(&args).unwrap();
/// assert_eq!(config.base_url, "/api");
/// assert!(config.strict);
/// ```
pub fn resolve_config(args: &GenerateArgs) -> Result<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => GenerationConfig::default(),
    };

    if let Some(base_url) = &args.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(name) = &args.types_file {
        config.types_module.clone_from(name);
    }
    if let Some(name) = &args.apis_file {
        config.requests_module.clone_from(name);
    }
    if let Some(format) = &args.args_type_format {
        config.naming.args_type.clone_from(format);
    }
    if let Some(format) = &args.return_type_format {
        config.naming.return_type.clone_from(format);
    }
    if let Some(format) = &args.function_name_format {
        config.naming.function.clone_from(format);
    }
    match args.alias_naming {
        Some(AliasNamingArg::Declared) => config.alias_naming = AliasNaming::Declared,
        // Keep a prefix chosen in the config file
        Some(AliasNamingArg::Sequential)
            if !matches!(config.alias_naming, AliasNaming::Sequential { .. }) =>
        {
            config.alias_naming = AliasNaming::Sequential {
                prefix: "Alias".to_string(),
            };
        }
        _ => {}
    }
    config.strict |= args.strict;
    config.include_internal |= args.include_internal;

    Ok(config)
}

/// Writes every generated file below `out_dir`, creating directories as
/// needed.
///
/// # Errors
///
/// Returns an error if a directory or file cannot be written.
pub fn write_files(out_dir: &Path, code: &GeneratedCode) -> Result<()> {
    for file in code.files() {
        let path = out_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = file.content.len(), "wrote file");
    }
    Ok(())
}

/// Runs the generate command.
///
/// Files are written even when some endpoints were dropped; the exit code
/// is [`ExitCode::ERROR`] in that case.
///
/// # Errors
///
/// Returns an error if:
/// - The config file or manifest cannot be read or parsed
/// - The settings are invalid
/// - The run aborts (strict mode, unresolved alias)
/// - Output files cannot be written
pub fn run(args: &GenerateArgs, output_format: OutputFormat) -> Result<ExitCode> {
    let config = resolve_config(args)?;
    let generator = Generator::new(config).context("invalid generation settings")?;
    let manifest = Manifest::load(&args.manifest)?;
    let (generator, endpoints) = manifest.install(generator);

    info!(
        manifest = %args.manifest.display(),
        endpoints = endpoints.len(),
        "generating client"
    );

    let generation = generator.run(&endpoints).context("generation run aborted")?;
    write_files(&args.out_dir, &generation.code)?;

    let report = GenerationReport::new(&args.out_dir, &generation);
    println!("{}", format_output(&report, output_format)?);

    if generation.diagnostics.has_fatal() {
        Ok(ExitCode::ERROR)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
