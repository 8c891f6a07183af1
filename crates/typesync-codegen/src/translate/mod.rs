//! Translator registry.
//!
//! A [`Translator`] turns one family of raw descriptors into a
//! [`TypeNode`]. The registry tries caller-registered extension translators
//! first, in registration order, then the built-in ones. When nothing
//! matches, the shape degrades to `Unknown` with an `unsupported-type`
//! warning and generation continues.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use typesync_codegen::translate::{ClassMapTranslator, TranslatorRegistry};
//! use typesync_core::RawType;
//!
//! let mut registry = TranslatorRegistry::new();
//! registry.register(ClassMapTranslator::new(HashMap::from([(
//!     "datetime.datetime".to_string(),
//!     RawType::Str,
//! )])));
//!
//! let ids: Vec<_> = registry.ids().collect();
//! assert_eq!(ids[0], "class-map");
//! ```

mod builtin;
mod class_map;
mod response;

pub use builtin::{
    ContainerTranslator, DefinitionTranslator, LiteralTranslator, PrimitiveTranslator,
    UnionTranslator,
};
pub use class_map::ClassMapTranslator;
pub use response::ResponseTranslator;

use crate::graph::{TypeGraphBuilder, TypeNode};
use std::fmt;
use typesync_core::{DiagnosticCode, RawType};

/// A pluggable handler for one family of raw shapes.
pub trait Translator: fmt::Debug + Send + Sync {
    /// Stable identifier, shown in listings and conflict diagnostics.
    fn id(&self) -> &str;

    /// Returns `true` if this translator handles `raw`.
    fn matches(&self, raw: &RawType) -> bool;

    /// Translates `raw`, building children through `builder`.
    fn translate(&self, raw: &RawType, builder: &mut TypeGraphBuilder<'_>) -> TypeNode;
}

/// Ordered set of translators.
#[derive(Debug)]
pub struct TranslatorRegistry {
    extensions: Vec<Box<dyn Translator>>,
    builtins: Vec<Box<dyn Translator>>,
}

impl TranslatorRegistry {
    /// Creates a registry holding only the built-in translators.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extensions: Vec::new(),
            builtins: vec![
                Box::new(ResponseTranslator),
                Box::new(PrimitiveTranslator),
                Box::new(ContainerTranslator),
                Box::new(UnionTranslator),
                Box::new(LiteralTranslator),
                Box::new(DefinitionTranslator),
            ],
        }
    }

    /// Appends an extension translator.
    ///
    /// Extensions are tried before every built-in, in registration order.
    pub fn register(&mut self, translator: impl Translator + 'static) {
        tracing::debug!(id = translator.id(), "registered translator");
        self.extensions.push(Box::new(translator));
    }

    /// Translator identifiers in dispatch order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.extensions
            .iter()
            .chain(&self.builtins)
            .map(|t| t.id())
    }

    /// Number of registered extension translators.
    #[must_use]
    pub fn extension_count(&self) -> usize {
        self.extensions.len()
    }

    /// Translates `raw` with the first matching translator.
    ///
    /// If more than one extension matches, the earliest registered wins and
    /// a `translator-conflict` warning names the others.
    pub fn resolve(&self, raw: &RawType, builder: &mut TypeGraphBuilder<'_>) -> TypeNode {
        let mut matching = self.extensions.iter().filter(|t| t.matches(raw));
        if let Some(first) = matching.next() {
            let shadowed: Vec<&str> = matching.map(|t| t.id()).collect();
            if !shadowed.is_empty() {
                builder.warn(
                    DiagnosticCode::TranslatorConflict,
                    &raw.to_string(),
                    &format!(
                        "translators {} also match; using '{}'",
                        shadowed.join(", "),
                        first.id()
                    ),
                );
            }
            tracing::trace!(id = first.id(), raw = %raw, "extension translator matched");
            return first.translate(raw, builder);
        }

        match self.builtins.iter().find(|t| t.matches(raw)) {
            Some(builtin) => {
                tracing::trace!(id = builtin.id(), raw = %raw, "built-in translator matched");
                builtin.translate(raw, builder)
            }
            None => builder.unsupported(raw, "no translator matched"),
        }
    }
}

impl Default for TranslatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PrimitiveKind;
    use typesync_core::{GenerationConfig, TypeDefinitions};

    #[derive(Debug)]
    struct Fixed {
        id: &'static str,
        path: &'static str,
        node: TypeNode,
    }

    impl Translator for Fixed {
        fn id(&self) -> &str {
            self.id
        }

        fn matches(&self, raw: &RawType) -> bool {
            matches!(raw, RawType::Class { path, .. } if path == self.path)
        }

        fn translate(&self, _raw: &RawType, _builder: &mut TypeGraphBuilder<'_>) -> TypeNode {
            self.node.clone()
        }
    }

    #[derive(Debug)]
    struct EveryInt;

    impl Translator for EveryInt {
        fn id(&self) -> &str {
            "every-int"
        }

        fn matches(&self, raw: &RawType) -> bool {
            *raw == RawType::Int
        }

        fn translate(&self, _raw: &RawType, _builder: &mut TypeGraphBuilder<'_>) -> TypeNode {
            TypeNode::string()
        }
    }

    fn resolve(registry: &TranslatorRegistry, raw: &RawType) -> (TypeNode, typesync_core::Diagnostics) {
        let definitions = TypeDefinitions::new();
        let config = GenerationConfig::default();
        let mut builder = TypeGraphBuilder::new(registry, &definitions, &config);
        let node = builder.build(raw);
        let (_, diagnostics) = builder.finish();
        (node, diagnostics)
    }

    #[test]
    fn test_builtin_ids_in_order() {
        let registry = TranslatorRegistry::new();
        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(
            ids,
            vec![
                "builtin.response",
                "builtin.primitive",
                "builtin.container",
                "builtin.union",
                "builtin.literal",
                "builtin.definition",
            ]
        );
        assert_eq!(registry.extension_count(), 0);
    }

    #[test]
    fn test_extension_intercepts_before_builtins() {
        let mut registry = TranslatorRegistry::new();
        registry.register(EveryInt);
        let (node, diagnostics) = resolve(&registry, &RawType::list(RawType::Int));
        assert_eq!(node, TypeNode::list(TypeNode::string()));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_conflict_first_registered_wins() {
        let mut registry = TranslatorRegistry::new();
        registry.register(Fixed {
            id: "money-a",
            path: "money.Money",
            node: TypeNode::string(),
        });
        registry.register(Fixed {
            id: "money-b",
            path: "money.Money",
            node: TypeNode::primitive(PrimitiveKind::Float),
        });

        let raw = RawType::list(RawType::class("money.Money", vec![]));
        let (node, diagnostics) = resolve(&registry, &RawType::tuple(vec![raw.clone(), raw]));

        assert_eq!(
            node,
            TypeNode::tuple(vec![
                TypeNode::list(TypeNode::string()),
                TypeNode::list(TypeNode::string())
            ])
        );
        let conflicts: Vec<_> = diagnostics
            .with_code(DiagnosticCode::TranslatorConflict)
            .collect();
        assert_eq!(conflicts.len(), 1);
        assert!(conflicts[0].message.contains("money-b"));
    }

    #[test]
    fn test_no_match_is_unknown_with_warning() {
        let registry = TranslatorRegistry::new();
        let (node, diagnostics) = resolve(&registry, &RawType::Ellipsis);
        assert!(matches!(node, TypeNode::Unknown { .. }));
        assert_eq!(
            diagnostics.iter().next().map(|d| d.code),
            Some(DiagnosticCode::UnsupportedType)
        );
    }
}
