//! Core types, descriptors, and errors for typesync.
//!
//! This crate provides the foundational types shared by the code generation
//! engine and the command-line front end.
//!
//! # Architecture
//!
//! The core consists of:
//! - Raw type descriptors (`RawType`, `TypeDefinitions`) as produced by an
//!   upstream annotation extractor
//! - Endpoint descriptors and path-pattern parsing
//! - Strong domain types (`EndpointName`, `HttpMethod`)
//! - Diagnostics with severity and stable codes
//! - Error hierarchy with contextual information
//! - Generation configuration

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod diagnostic;
mod endpoint;
mod error;
mod raw;
mod types;

pub use config::{AliasNaming, GenerationConfig, GenerationConfigBuilder, NamingFormats};
pub use diagnostic::{Diagnostic, DiagnosticCode, Diagnostics, Severity};
pub use endpoint::{
    ArgumentSpec, BodySpec, Endpoint, EndpointMeta, PathPattern, PathSegment, Visibility,
};
pub use error::{Error, Result};
pub use raw::{FieldDef, LiteralValue, RawType, TypeDef, TypeDefinitions};
pub use types::{EndpointName, HttpMethod};
