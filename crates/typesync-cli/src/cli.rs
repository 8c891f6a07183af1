//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Typesync - typed TypeScript clients from annotated endpoints.
///
/// Reads an endpoint manifest produced by the route extractor and writes a
/// types module plus a request helpers module.
#[derive(Parser, Debug)]
#[command(name = "typesync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format of the run report
    #[arg(long = "format", global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the client modules from a manifest.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Defaults: types.ts and apis.ts in ./client
    /// typesync generate endpoints.json ./client
    ///
    /// # Strict run with a URL prefix
    /// typesync generate endpoints.json ./client --endpoint /api --strict
    /// ```
    Generate(GenerateArgs),

    /// List translators in dispatch order.
    ListTranslators {
        /// Manifest whose class map adds an extension translator
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
}

/// Arguments of `typesync generate`.
///
/// Flags override values loaded from `--config`.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Endpoint manifest (JSON)
    pub manifest: PathBuf,

    /// Directory the modules are written to
    pub out_dir: PathBuf,

    /// TOML file with generation settings
    #[arg(long, env = "TYPESYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Prefix joined onto every generated URL
    #[arg(long = "endpoint", value_name = "BASE")]
    pub base_url: Option<String>,

    /// File name of the types module
    #[arg(long = "types-file", value_name = "NAME")]
    pub types_file: Option<String>,

    /// File name of the request helpers module
    #[arg(long = "apis-file", value_name = "NAME")]
    pub apis_file: Option<String>,

    /// Handlebars format of the Return type names
    #[arg(long, value_name = "FORMAT")]
    pub return_type_format: Option<String>,

    /// Handlebars format of the Args type names
    #[arg(long, value_name = "FORMAT")]
    pub args_type_format: Option<String>,

    /// Handlebars format of the request function names
    #[arg(long, value_name = "FORMAT")]
    pub function_name_format: Option<String>,

    /// How aliases for self-referential types are named
    #[arg(long, value_enum)]
    pub alias_naming: Option<AliasNamingArg>,

    /// Fail if any type could not be translated
    #[arg(long)]
    pub strict: bool,

    /// Emit endpoints marked internal
    #[arg(long)]
    pub include_internal: bool,
}

/// Alias naming strategy as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AliasNamingArg {
    /// Named after the declared type, e.g. `TreeInt`
    Declared,
    /// `Alias1`, `Alias2`, ... in discovery order
    Sequential,
}

/// Format of the report printed after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colorized, human-readable
    #[default]
    Pretty,
    /// JSON for machine parsing
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_positional_arguments() {
        let cli = Cli::parse_from(["typesync", "generate", "endpoints.json", "client"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.manifest, PathBuf::from("endpoints.json"));
        assert_eq!(args.out_dir, PathBuf::from("client"));
        assert!(!args.strict);
        assert!(args.alias_naming.is_none());
        assert_eq!(cli.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_generate_overrides() {
        let cli = Cli::parse_from([
            "typesync",
            "generate",
            "m.json",
            "out",
            "--endpoint",
            "/api",
            "--types-file",
            "t.ts",
            "--apis-file",
            "a.ts",
            "--function-name-format",
            "{{r_cc}}{{m_pc}}",
            "--alias-naming",
            "sequential",
            "--strict",
            "--include-internal",
            "--format",
            "json",
            "-v",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.base_url.as_deref(), Some("/api"));
        assert_eq!(args.types_file.as_deref(), Some("t.ts"));
        assert_eq!(args.apis_file.as_deref(), Some("a.ts"));
        assert_eq!(args.function_name_format.as_deref(), Some("{{r_cc}}{{m_pc}}"));
        assert_eq!(args.alias_naming, Some(AliasNamingArg::Sequential));
        assert!(args.strict);
        assert!(args.include_internal);
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_list_translators() {
        let cli = Cli::parse_from(["typesync", "list-translators"]);
        assert!(matches!(cli.command, Commands::ListTranslators { manifest: None }));
    }

    #[test]
    fn test_generate_requires_out_dir() {
        assert!(Cli::try_parse_from(["typesync", "generate", "m.json"]).is_err());
    }
}
