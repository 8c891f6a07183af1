//! Command implementations for the typesync CLI.
//!
//! Each command module resolves its inputs, does the work, and prints a
//! report in the requested output format.

pub mod generate;
pub mod list_translators;
