//! Built-in translators for the closed set of annotation shapes.

use super::Translator;
use crate::graph::{Field, PrimitiveKind, TypeGraphBuilder, TypeNode};
use typesync_core::{DiagnosticCode, RawType, TypeDef};

/// Scalars: `int`, `float`, `str`, `bool`, `None`, `bytes`, `Any`, `Never`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveTranslator;

impl Translator for PrimitiveTranslator {
    fn id(&self) -> &str {
        "builtin.primitive"
    }

    fn matches(&self, raw: &RawType) -> bool {
        matches!(
            raw,
            RawType::Int
                | RawType::Float
                | RawType::Str
                | RawType::Bool
                | RawType::NoneType
                | RawType::Bytes
                | RawType::Any
                | RawType::Never
        )
    }

    fn translate(&self, raw: &RawType, builder: &mut TypeGraphBuilder<'_>) -> TypeNode {
        let kind = match raw {
            RawType::Int => PrimitiveKind::Integer,
            RawType::Float => PrimitiveKind::Float,
            RawType::Str => PrimitiveKind::String,
            RawType::Bool => PrimitiveKind::Boolean,
            RawType::NoneType => PrimitiveKind::Null,
            RawType::Bytes => PrimitiveKind::Bytes,
            RawType::Any => PrimitiveKind::Any,
            RawType::Never => PrimitiveKind::Never,
            other => return builder.unsupported(other, "not a primitive"),
        };
        TypeNode::primitive(kind)
    }
}

/// `list`, `set`, `tuple` and `dict`, bare or parameterized.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerTranslator;

impl ContainerTranslator {
    fn sequence(raw: &RawType, args: &[RawType], builder: &mut TypeGraphBuilder<'_>) -> TypeNode {
        if args.len() > 1 {
            builder.warn(
                DiagnosticCode::InvalidArity,
                &raw.to_string(),
                &format!("expected 1 type argument, got {}; using the first", args.len()),
            );
        }
        let element = args
            .first()
            .map_or_else(TypeNode::any, |element| builder.build(element));
        TypeNode::list(element)
    }

    fn tuple(raw: &RawType, args: &[RawType], builder: &mut TypeGraphBuilder<'_>) -> TypeNode {
        let Some((last, init)) = args.split_last() else {
            return TypeNode::list(TypeNode::any());
        };

        if init.contains(&RawType::Ellipsis) {
            builder.warn(
                DiagnosticCode::InvalidArity,
                &raw.to_string(),
                "'...' is only allowed as the last tuple argument",
            );
            return TypeNode::unknown(format!("{raw}: misplaced '...'"));
        }

        if *last != RawType::Ellipsis {
            return TypeNode::tuple(args.iter().map(|a| builder.build(a)).collect());
        }

        match init {
            [] => TypeNode::list(TypeNode::any()),
            [single] => TypeNode::list(builder.build(single)),
            _ => TypeNode::Tuple {
                elements: init.iter().map(|a| builder.build(a)).collect(),
                variadic: true,
            },
        }
    }

    fn dict(raw: &RawType, args: &[RawType], builder: &mut TypeGraphBuilder<'_>) -> TypeNode {
        if !args.is_empty() && args.len() != 2 {
            builder.warn(
                DiagnosticCode::InvalidArity,
                &raw.to_string(),
                &format!("expected 2 type arguments, got {}", args.len()),
            );
        }
        let key = args
            .first()
            .map_or_else(TypeNode::string, |k| builder.build(k));
        let value = args.get(1).map_or_else(TypeNode::any, |v| builder.build(v));
        TypeNode::dict(key, value)
    }
}

impl Translator for ContainerTranslator {
    fn id(&self) -> &str {
        "builtin.container"
    }

    fn matches(&self, raw: &RawType) -> bool {
        matches!(
            raw,
            RawType::List { .. } | RawType::Set { .. } | RawType::Tuple { .. } | RawType::Dict { .. }
        )
    }

    fn translate(&self, raw: &RawType, builder: &mut TypeGraphBuilder<'_>) -> TypeNode {
        match raw {
            RawType::List { args } | RawType::Set { args } => Self::sequence(raw, args, builder),
            RawType::Tuple { args } => Self::tuple(raw, args, builder),
            RawType::Dict { args } => Self::dict(raw, args, builder),
            other => builder.unsupported(other, "not a container"),
        }
    }
}

/// `Union[...]` and `Optional[...]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnionTranslator;

impl Translator for UnionTranslator {
    fn id(&self) -> &str {
        "builtin.union"
    }

    fn matches(&self, raw: &RawType) -> bool {
        matches!(raw, RawType::Union { .. } | RawType::Optional { .. })
    }

    fn translate(&self, raw: &RawType, builder: &mut TypeGraphBuilder<'_>) -> TypeNode {
        let null = TypeNode::primitive(PrimitiveKind::Null);
        match raw {
            RawType::Union { args } => {
                let variants: Vec<TypeNode> = args.iter().map(|a| builder.build(a)).collect();
                TypeNode::union(variants)
            }
            RawType::Optional { args } => {
                if args.len() != 1 {
                    builder.warn(
                        DiagnosticCode::InvalidArity,
                        &raw.to_string(),
                        &format!("expected 1 type argument, got {}", args.len()),
                    );
                }
                let mut variants: Vec<TypeNode> = args.iter().map(|a| builder.build(a)).collect();
                variants.push(null);
                TypeNode::union(variants)
            }
            other => builder.unsupported(other, "not a union"),
        }
    }
}

/// `Literal[...]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralTranslator;

impl Translator for LiteralTranslator {
    fn id(&self) -> &str {
        "builtin.literal"
    }

    fn matches(&self, raw: &RawType) -> bool {
        matches!(raw, RawType::Literal { .. })
    }

    fn translate(&self, raw: &RawType, builder: &mut TypeGraphBuilder<'_>) -> TypeNode {
        match raw {
            RawType::Literal { values } => TypeNode::literal(values.iter().cloned()),
            other => builder.unsupported(other, "not a literal"),
        }
    }
}

/// References into the type definitions: aliases, typed dicts and enums.
///
/// Generic parameters are bound to the reference's arguments before the
/// declaration body is built.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefinitionTranslator;

impl Translator for DefinitionTranslator {
    fn id(&self) -> &str {
        "builtin.definition"
    }

    fn matches(&self, raw: &RawType) -> bool {
        matches!(raw, RawType::Named { .. })
    }

    fn translate(&self, raw: &RawType, builder: &mut TypeGraphBuilder<'_>) -> TypeNode {
        let RawType::Named { name, args } = raw else {
            return builder.unsupported(raw, "not a named type");
        };
        let Some(def) = builder.definitions().get(name) else {
            let message = format!("'{name}' is not declared, defaulting to 'any'");
            builder.warn(DiagnosticCode::UnresolvedDefinition, &raw.to_string(), &message);
            return TypeNode::unknown(message);
        };

        let params = def.params();
        if args.len() > params.len() || (!args.is_empty() && args.len() < params.len()) {
            builder.warn(
                DiagnosticCode::InvalidArity,
                &raw.to_string(),
                &format!(
                    "'{name}' takes {} type argument(s), got {}",
                    params.len(),
                    args.len()
                ),
            );
        }
        let bindings = def.bind(args);

        match def {
            TypeDef::Alias { value, .. } => builder.build(&value.substitute(&bindings)),
            TypeDef::TypedDict { fields, .. } => TypeNode::Object {
                fields: fields
                    .iter()
                    .map(|field| Field {
                        name: field.name.clone(),
                        node: builder.build(&field.ty.substitute(&bindings)),
                        required: field.required,
                    })
                    .collect(),
            },
            TypeDef::Enum { members } => TypeNode::literal(members.iter().cloned()),
        }
    }
}
