//! Typesync CLI.
//!
//! Generates a typed TypeScript client from an endpoint manifest.
//!
//! # Examples
//!
//! ```bash
//! # Generate types.ts and apis.ts into ./client
//! typesync generate endpoints.json ./client
//!
//! # Show the translator dispatch order
//! typesync list-translators --manifest endpoints.json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use typesync_cli::{Cli, Commands, ExitCode, OutputFormat, commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let exit_code = execute_command(&cli.command, cli.format)?;

    std::process::exit(exit_code.as_i32());
}

/// Sets up tracing on stderr; `RUST_LOG` applies unless `--verbose` is set.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Routes commands to their handlers.
fn execute_command(command: &Commands, output_format: OutputFormat) -> Result<ExitCode> {
    match command {
        Commands::Generate(args) => commands::generate::run(args, output_format),
        Commands::ListTranslators { manifest } => {
            commands::list_translators::run(manifest.as_deref(), output_format)
        }
    }
}
