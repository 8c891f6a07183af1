//! Typesync CLI library.
//!
//! Exposes the command implementations and formatters behind the
//! `typesync` binary so they can be tested without spawning a process.

#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod commands;
pub mod formatters;
pub mod manifest;

pub use cli::{Cli, Commands, GenerateArgs, OutputFormat};

/// Process exit code with semantic meaning.
///
/// # Examples
///
/// ```
/// use typesync_cli::ExitCode;
///
/// assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
/// assert!(!ExitCode::ERROR.is_success());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Every endpoint was emitted (exit code 0).
    pub const SUCCESS: Self = Self(0);

    /// The run aborted or at least one endpoint was dropped (exit code 1).
    pub const ERROR: Self = Self(1);

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }
}
