//! Type graph construction and TypeScript client generation.
//!
//! Turns endpoint descriptors with raw type annotations into two modules:
//! a types module with one Args/Return declaration pair per endpoint, and a
//! requests module exposing one async function per endpoint and method.
//!
//! # Architecture
//!
//! - [`converter`]: path converter names to primitive shapes
//! - [`translate`]: ordered translator registry, extensions before built-ins
//! - [`graph`]: recursive type graph builder with alias-based cycle breaking
//! - [`consistency`]: path placeholders versus declared arguments
//! - [`emit`]: handlebars rendering of both modules
//! - [`generator`]: the pipeline tying a run together
//!
//! # Examples
//!
//! ```
//! use typesync_codegen::Generator;
//! use typesync_core::{Endpoint, GenerationConfig, RawType, TypeDef, TypeDefinitions};
//!
//! let definitions = TypeDefinitions::new().with(
//!     "SelfRef",
//!     TypeDef::Alias {
//!         params: vec![],
//!         value: RawType::tuple(vec![RawType::Int, RawType::named("SelfRef")]),
//!     },
//! );
//! let generator = Generator::new(GenerationConfig::default())
//!     .unwrap()
//!     .with_definitions(definitions);
//!
//! let run = generator
//!     .run(&[Endpoint::new("recursive", "/recursive").returning(RawType::named("SelfRef"))])
//!     .unwrap();
//! assert!(run.types().contains("export type SelfRef = [number, SelfRef];"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod consistency;
pub mod converter;
pub mod emit;
pub mod generator;
pub mod graph;
pub mod naming;
pub mod template_engine;
pub mod translate;
pub mod types;

pub use generator::Generator;
pub use types::{GeneratedCode, GeneratedFile, Generation};
