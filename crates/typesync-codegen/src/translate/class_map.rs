//! Extension translator replacing opaque classes with known shapes.

use super::Translator;
use crate::graph::{TypeGraphBuilder, TypeNode};
use std::collections::HashMap;
use typesync_core::RawType;

/// Maps fully qualified class paths to replacement raw types.
///
/// Typical entries map `datetime.datetime` or `uuid.UUID` to `str`, or a
/// model class to a named typed dict. The replacement is built like any
/// other descriptor, so it may itself reference type definitions.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use typesync_codegen::translate::{ClassMapTranslator, Translator};
/// use typesync_core::RawType;
///
/// let t = ClassMapTranslator::new(HashMap::from([("uuid.UUID".to_string(), RawType::Str)]));
/// assert!(t.matches(&RawType::class("uuid.UUID", vec![])));
/// assert!(!t.matches(&RawType::Str));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClassMapTranslator {
    classes: HashMap<String, RawType>,
}

impl ClassMapTranslator {
    /// Creates a translator for the given class table.
    #[must_use]
    pub const fn new(classes: HashMap<String, RawType>) -> Self {
        Self { classes }
    }

    /// Number of mapped classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if no class is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Translator for ClassMapTranslator {
    fn id(&self) -> &str {
        "class-map"
    }

    fn matches(&self, raw: &RawType) -> bool {
        matches!(raw, RawType::Class { path, .. } if self.classes.contains_key(path))
    }

    fn translate(&self, raw: &RawType, builder: &mut TypeGraphBuilder<'_>) -> TypeNode {
        match raw {
            RawType::Class { path, .. } => match self.classes.get(path) {
                Some(replacement) => builder.build(replacement),
                None => builder.unsupported(raw, "class is not mapped"),
            },
            other => builder.unsupported(other, "not a class"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::TranslatorRegistry;
    use typesync_core::{GenerationConfig, TypeDef, TypeDefinitions};

    #[test]
    fn test_replacement_may_reference_definitions() {
        let mut registry = TranslatorRegistry::new();
        registry.register(ClassMapTranslator::new(HashMap::from([
            ("app.models.User".to_string(), RawType::named("UserDict")),
            ("datetime.date".to_string(), RawType::Str),
        ])));
        let definitions = TypeDefinitions::new().with(
            "UserDict",
            TypeDef::Alias {
                params: vec![],
                value: RawType::tuple(vec![RawType::Int, RawType::class("datetime.date", vec![])]),
            },
        );
        let config = GenerationConfig::default();
        let mut builder = TypeGraphBuilder::new(&registry, &definitions, &config);

        let node = builder.build(&RawType::list(RawType::class("app.models.User", vec![])));
        assert_eq!(
            node,
            TypeNode::list(TypeNode::tuple(vec![TypeNode::integer(), TypeNode::string()]))
        );
        let (_, diagnostics) = builder.finish();
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_self_referencing_class_becomes_alias() {
        let mut registry = TranslatorRegistry::new();
        registry.register(ClassMapTranslator::new(HashMap::from([(
            "app.Node".to_string(),
            RawType::list(RawType::class("app.Node", vec![])),
        )])));
        let definitions = TypeDefinitions::new();
        let config = GenerationConfig::default();
        let mut builder = TypeGraphBuilder::new(&registry, &definitions, &config);

        let node = builder.build(&RawType::class("app.Node", vec![]));
        assert_eq!(
            node,
            TypeNode::NamedAlias {
                name: "Node".to_string(),
                definition: Box::new(TypeNode::list(TypeNode::reference("Node"))),
            }
        );
        assert_eq!(
            builder.build(&RawType::class("app.Node", vec![])),
            TypeNode::reference("Node")
        );

        let (aliases, diagnostics) = builder.finish();
        assert_eq!(aliases.len(), 1);
        assert!(diagnostics.is_empty());
    }
}
