//! Unwraps typed framework responses to their payload type.

use super::Translator;
use crate::graph::{TypeGraphBuilder, TypeNode};
use typesync_core::RawType;

const RESPONSE_CLASSES: [&str; 3] = ["typesync.Response", "flask.Response", "flask.wrappers.Response"];

/// `Response[T]` becomes `T`.
///
/// Views may annotate their return value with a response wrapper that
/// carries the JSON payload type as its single argument. Unparameterized
/// responses are not matched and degrade like any other opaque class.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseTranslator;

impl Translator for ResponseTranslator {
    fn id(&self) -> &str {
        "builtin.response"
    }

    fn matches(&self, raw: &RawType) -> bool {
        matches!(
            raw,
            RawType::Class { path, args } if args.len() == 1 && RESPONSE_CLASSES.contains(&path.as_str())
        )
    }

    fn translate(&self, raw: &RawType, builder: &mut TypeGraphBuilder<'_>) -> TypeNode {
        match raw.args() {
            [payload] => builder.build(payload),
            _ => builder.unsupported(raw, "response without a payload type"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::TranslatorRegistry;
    use typesync_core::{DiagnosticCode, GenerationConfig, TypeDefinitions};

    #[test]
    fn test_matches_parameterized_responses_only() {
        let t = ResponseTranslator;
        assert!(t.matches(&RawType::class("typesync.Response", vec![RawType::Int])));
        assert!(t.matches(&RawType::class("flask.Response", vec![RawType::Str])));
        assert!(!t.matches(&RawType::class("flask.Response", vec![])));
        assert!(!t.matches(&RawType::class("starlette.Response", vec![RawType::Int])));
    }

    #[test]
    fn test_unwraps_payload() {
        let registry = TranslatorRegistry::new();
        let definitions = TypeDefinitions::new();
        let config = GenerationConfig::default();
        let mut builder = TypeGraphBuilder::new(&registry, &definitions, &config);

        let node = builder.build(&RawType::class(
            "typesync.Response",
            vec![RawType::list(RawType::Str)],
        ));
        assert_eq!(node, TypeNode::list(TypeNode::string()));

        let bare = builder.build(&RawType::class("flask.Response", vec![]));
        assert!(matches!(bare, TypeNode::Unknown { .. }));
        let (_, diagnostics) = builder.finish();
        assert_eq!(diagnostics.with_code(DiagnosticCode::UnsupportedType).count(), 1);
    }
}
