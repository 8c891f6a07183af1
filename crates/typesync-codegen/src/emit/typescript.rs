//! TypeScript rendering of type nodes.
//!
//! # Examples
//!
//! ```
//! use typesync_codegen::emit::typescript::render;
//! use typesync_codegen::graph::{PrimitiveKind, TypeNode};
//!
//! let node = TypeNode::list(TypeNode::union(vec![
//!     TypeNode::integer(),
//!     TypeNode::string(),
//! ]));
//! assert_eq!(render(&node), "(number | string)[]");
//! ```

use crate::graph::{Field, PrimitiveKind, TypeNode};
use crate::naming::is_identifier;
use serde_json::Value;
use typesync_core::LiteralValue;

const fn primitive(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Integer | PrimitiveKind::Float => "number",
        PrimitiveKind::String | PrimitiveKind::Bytes => "string",
        PrimitiveKind::Boolean => "boolean",
        PrimitiveKind::Null => "null",
        PrimitiveKind::Any => "any",
        PrimitiveKind::Never => "never",
        PrimitiveKind::Undefined => "undefined",
    }
}

/// Renders a literal constant.
#[must_use]
pub fn literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Null => "null".to_string(),
        LiteralValue::Bool(b) => b.to_string(),
        LiteralValue::Int(i) => i.to_string(),
        LiteralValue::Str(s) => Value::String(s.clone()).to_string(),
    }
}

/// Renders an object key, quoting it when it is not an identifier.
#[must_use]
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        Value::String(name.to_string()).to_string()
    }
}

fn object<'a>(fields: impl IntoIterator<Item = (String, bool, &'a TypeNode)>) -> String {
    let body: Vec<String> = fields
        .into_iter()
        .map(|(key, required, node)| {
            let marker = if required { "" } else { "?" };
            format!("{key}{marker}: {}", render(node))
        })
        .collect();
    if body.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", body.join("; "))
    }
}

// Operand of `[]`: bare unions would bind the brackets to the last variant
fn atom(node: &TypeNode) -> String {
    let rendered = render(node);
    let needs_parens = match node {
        TypeNode::Union { .. } | TypeNode::Optional { .. } => true,
        TypeNode::Literal { values } => values.len() > 1,
        _ => false,
    };
    if needs_parens {
        format!("({rendered})")
    } else {
        rendered
    }
}

/// Renders `node` as a TypeScript type expression.
///
/// Aliases, whether first occurrence or reference, render as their name;
/// their declarations are emitted separately.
#[must_use]
pub fn render(node: &TypeNode) -> String {
    match node {
        TypeNode::Primitive { primitive: kind } => primitive(*kind).to_string(),
        TypeNode::Optional { inner } => format!("{} | null", render(inner)),
        TypeNode::Union { variants } => variants
            .iter()
            .map(render)
            .collect::<Vec<_>>()
            .join(" | "),
        TypeNode::List { element } => format!("{}[]", atom(element)),
        TypeNode::Tuple { elements, variadic } => {
            let mut parts: Vec<String> = elements.iter().map(render).collect();
            if *variadic && let (Some(last), Some(slot)) = (elements.last(), parts.last_mut()) {
                *slot = format!("...{}[]", atom(last));
            }
            format!("[{}]", parts.join(", "))
        }
        TypeNode::Dict { key, value } => match key.as_ref() {
            TypeNode::Literal { values } if values.iter().all(|v| matches!(v, LiteralValue::Str(_))) => {
                object(values.iter().filter_map(|v| match v {
                    LiteralValue::Str(s) => Some((property_key(s), true, value.as_ref())),
                    _ => None,
                }))
            }
            _ => format!("Record<{}, {}>", render(key), render(value)),
        },
        TypeNode::Literal { values } => values.iter().map(literal).collect::<Vec<_>>().join(" | "),
        TypeNode::Object { fields } => object(
            fields
                .iter()
                .map(|Field { name, node, required }| (property_key(name), *required, node)),
        ),
        TypeNode::NamedAlias { name, .. } | TypeNode::Reference { name } => name.clone(),
        TypeNode::Unknown { .. } => "any".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives() {
        assert_eq!(render(&TypeNode::integer()), "number");
        assert_eq!(render(&TypeNode::primitive(PrimitiveKind::Float)), "number");
        assert_eq!(render(&TypeNode::primitive(PrimitiveKind::Bytes)), "string");
        assert_eq!(render(&TypeNode::primitive(PrimitiveKind::Undefined)), "undefined");
        assert_eq!(render(&TypeNode::unknown("x")), "any");
    }

    #[test]
    fn test_nested_tuple() {
        let node = TypeNode::tuple(vec![
            TypeNode::tuple(vec![TypeNode::boolean(), TypeNode::string(), TypeNode::boolean()]),
            TypeNode::integer(),
        ]);
        assert_eq!(render(&node), "[[boolean, string, boolean], number]");
    }

    #[test]
    fn test_variadic_tuple() {
        let node = TypeNode::Tuple {
            elements: vec![TypeNode::string(), TypeNode::optional(TypeNode::integer())],
            variadic: true,
        };
        assert_eq!(render(&node), "[string, ...(number | null)[]]");
    }

    #[test]
    fn test_optional_and_union() {
        assert_eq!(render(&TypeNode::optional(TypeNode::string())), "string | null");
        let union = TypeNode::Union {
            variants: vec![TypeNode::integer(), TypeNode::string(), TypeNode::primitive(PrimitiveKind::Null)],
        };
        assert_eq!(render(&union), "number | string | null");
    }

    #[test]
    fn test_literals() {
        let node = TypeNode::literal(vec![
            LiteralValue::str("a\"b"),
            LiteralValue::Int(-3),
            LiteralValue::Bool(true),
            LiteralValue::Null,
        ]);
        assert_eq!(render(&node), r#""a\"b" | -3 | true | null"#);
        assert_eq!(
            render(&TypeNode::list(TypeNode::literal(vec![LiteralValue::str("x")]))),
            r#""x"[]"#
        );
    }

    #[test]
    fn test_dicts() {
        assert_eq!(
            render(&TypeNode::dict(TypeNode::string(), TypeNode::any())),
            "Record<string, any>"
        );
        let keyed = TypeNode::dict(
            TypeNode::literal(vec![LiteralValue::str("a"), LiteralValue::str("b-c")]),
            TypeNode::integer(),
        );
        assert_eq!(render(&keyed), r#"{ a: number; "b-c": number }"#);
    }

    #[test]
    fn test_object() {
        let node = TypeNode::Object {
            fields: vec![
                Field::required("result", TypeNode::integer()),
                Field {
                    name: "note".to_string(),
                    node: TypeNode::string(),
                    required: false,
                },
            ],
        };
        assert_eq!(render(&node), "{ result: number; note?: string }");
        assert_eq!(render(&TypeNode::Object { fields: vec![] }), "{}");
    }

    #[test]
    fn test_aliases_render_by_name() {
        let node = TypeNode::tuple(vec![
            TypeNode::NamedAlias {
                name: "SelfRef".to_string(),
                definition: Box::new(TypeNode::integer()),
            },
            TypeNode::reference("SelfRef"),
        ]);
        assert_eq!(render(&node), "[SelfRef, SelfRef]");
    }
}
