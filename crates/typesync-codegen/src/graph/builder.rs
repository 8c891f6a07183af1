//! Recursive-descent construction of the type graph.
//!
//! # Examples
//!
//! ```
//! use typesync_codegen::graph::{TypeGraphBuilder, TypeNode};
//! use typesync_codegen::translate::TranslatorRegistry;
//! use typesync_core::{GenerationConfig, RawType, TypeDef, TypeDefinitions};
//!
//! let registry = TranslatorRegistry::new();
//! let definitions = TypeDefinitions::new().with(
//!     "SelfRef",
//!     TypeDef::Alias {
//!         params: vec![],
//!         value: RawType::tuple(vec![RawType::Int, RawType::named("SelfRef")]),
//!     },
//! );
//! let config = GenerationConfig::default();
//! let mut builder = TypeGraphBuilder::new(&registry, &definitions, &config);
//!
//! let node = builder.build(&RawType::named("SelfRef"));
//! assert!(matches!(node, TypeNode::NamedAlias { ref name, .. } if name == "SelfRef"));
//! assert_eq!(builder.build(&RawType::named("SelfRef")), TypeNode::reference("SelfRef"));
//! ```

use super::{AliasTable, FrozenAliases, TypeNode, VisitState};
use crate::translate::TranslatorRegistry;
use std::collections::HashSet;
use typesync_core::{
    Diagnostic, DiagnosticCode, Diagnostics, GenerationConfig, RawType, TypeDefinitions,
};

/// Builds [`TypeNode`]s for raw descriptors, one run at a time.
///
/// The builder threads the run's [`AliasTable`] and diagnostics through
/// every recursive call, including the calls translators make back into
/// [`build`](Self::build). Named and class raw types are tracked by
/// identity (their substituted display form); reaching one that is still
/// under construction allocates an alias and yields a
/// [`TypeNode::Reference`] instead of recursing.
#[derive(Debug)]
pub struct TypeGraphBuilder<'a> {
    registry: &'a TranslatorRegistry,
    definitions: &'a TypeDefinitions,
    aliases: AliasTable,
    diagnostics: Diagnostics,
    reported: HashSet<(DiagnosticCode, String)>,
    max_depth: usize,
    depth: usize,
}

impl<'a> TypeGraphBuilder<'a> {
    /// Creates a builder for one run.
    #[must_use]
    pub fn new(
        registry: &'a TranslatorRegistry,
        definitions: &'a TypeDefinitions,
        config: &GenerationConfig,
    ) -> Self {
        Self {
            registry,
            definitions,
            aliases: AliasTable::new(config.alias_naming.clone()),
            diagnostics: Diagnostics::new(),
            reported: HashSet::new(),
            max_depth: config.max_depth,
            depth: 0,
        }
    }

    /// Builds the node for `raw`.
    pub fn build(&mut self, raw: &RawType) -> TypeNode {
        tracing::trace!(raw = %raw, "building type node");
        match raw {
            RawType::Named { .. } => self.build_tracked(raw, &raw.to_string()),
            RawType::Class { path, .. } => {
                let identity = raw.to_string();
                // Alias names drop the module path: `app.models.Node` is `Node`
                let module = path.rfind('.').map_or(0, |dot| dot + 1);
                let declared = identity.get(module..).unwrap_or(&identity).to_string();
                self.build_tracked(raw, &declared)
            }
            _ => self.dispatch(raw),
        }
    }

    fn build_tracked(&mut self, raw: &RawType, declared: &str) -> TypeNode {
        let identity = raw.to_string();

        match self.aliases.state(&identity).cloned() {
            Some(VisitState::Done(node)) => return node,
            Some(VisitState::InProgress) => {
                let name = self.aliases.alias_for(&identity, declared);
                return TypeNode::reference(name);
            }
            None => {}
        }

        if self.depth >= self.max_depth {
            let message = format!(
                "generic expansion exceeded {} levels, defaulting to 'any'",
                self.max_depth
            );
            self.warn(DiagnosticCode::DepthExceeded, &identity, &message);
            return TypeNode::unknown(message);
        }

        self.aliases.begin(&identity);
        self.depth += 1;
        let mut node = self.dispatch(raw);
        self.depth -= 1;

        if let Some(name) = self.aliases.allocated(&identity)
            && node.refers_directly_to(name)
        {
            let message = format!(
                "alias '{name}' refers to itself outside any list, tuple or object, defaulting to 'any'"
            );
            self.warn(DiagnosticCode::UnsupportedType, &identity, &message);
            node = TypeNode::unknown(message);
        }
        self.aliases.finish(&identity, node)
    }

    fn dispatch(&mut self, raw: &RawType) -> TypeNode {
        let registry = self.registry;
        registry.resolve(raw, self)
    }

    /// Named declarations available to translators.
    #[must_use]
    pub const fn definitions(&self) -> &'a TypeDefinitions {
        self.definitions
    }

    /// Records a warning, once per code and subject.
    pub fn warn(&mut self, code: DiagnosticCode, subject: &str, message: &str) {
        if self.reported.insert((code, subject.to_string())) {
            self.diagnostics
                .push(Diagnostic::warning(code, subject, message));
        }
    }

    /// Records an `unsupported-type` warning and returns the degraded node.
    pub fn unsupported(&mut self, raw: &RawType, reason: &str) -> TypeNode {
        let subject = raw.to_string();
        self.warn(
            DiagnosticCode::UnsupportedType,
            &subject,
            &format!("{reason}, defaulting to 'any'"),
        );
        TypeNode::unknown(format!("{subject}: {reason}"))
    }

    /// Records any diagnostic without deduplication.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// The run's alias table, e.g. to reserve generated names up front.
    pub const fn aliases_mut(&mut self) -> &mut AliasTable {
        &mut self.aliases
    }

    /// Ends the run, freezing the alias table.
    #[must_use]
    pub fn finish(self) -> (FrozenAliases, Diagnostics) {
        tracing::debug!(aliases = self.aliases.len(), "type graph complete");
        (self.aliases.freeze(), self.diagnostics)
    }
}
