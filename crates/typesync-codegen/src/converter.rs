//! Path-segment converter mapping.
//!
//! Converters are the named rules a route uses to parse a URL segment
//! (`<int:id>`). Built-in converters map to primitives; callers may register
//! custom converters with an arbitrary raw type, which the generator then
//! builds through the translator registry.
//!
//! # Examples
//!
//! ```
//! use typesync_codegen::converter::ConverterMapper;
//! use typesync_codegen::graph::TypeNode;
//!
//! let mapper = ConverterMapper::new();
//! assert_eq!(mapper.map("int"), TypeNode::integer());
//! assert_eq!(mapper.map("path"), TypeNode::string());
//! assert_eq!(mapper.map("no-such-converter"), TypeNode::string());
//! assert!(!mapper.is_builtin("no-such-converter"));
//! ```

use crate::graph::{PrimitiveKind, TypeNode};
use indexmap::IndexMap;
use typesync_core::RawType;

/// Converter used when a placeholder names none.
pub const DEFAULT_CONVERTER: &str = "default";

const BUILTINS: [(&str, PrimitiveKind); 10] = [
    ("default", PrimitiveKind::String),
    ("string", PrimitiveKind::String),
    ("unicode", PrimitiveKind::String),
    ("any", PrimitiveKind::String),
    ("path", PrimitiveKind::String),
    ("uuid", PrimitiveKind::String),
    ("identifier", PrimitiveKind::String),
    ("int", PrimitiveKind::Integer),
    ("integer", PrimitiveKind::Integer),
    ("float", PrimitiveKind::Float),
];

/// Maps converter names to type shapes.
#[derive(Debug, Clone)]
pub struct ConverterMapper {
    builtins: IndexMap<&'static str, PrimitiveKind>,
    custom: IndexMap<String, RawType>,
}

impl ConverterMapper {
    /// Creates a mapper with only the built-in table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builtins: BUILTINS.into_iter().collect(),
            custom: IndexMap::new(),
        }
    }

    /// Registers a custom converter, replacing any earlier one of that name.
    pub fn register(&mut self, name: impl Into<String>, raw: RawType) {
        self.custom.insert(name.into(), raw);
    }

    /// Raw type of a custom converter.
    #[must_use]
    pub fn custom(&self, name: &str) -> Option<&RawType> {
        self.custom.get(name)
    }

    /// Returns `true` if `name` is in the built-in table.
    #[must_use]
    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtins.contains_key(name)
    }

    /// Maps a built-in converter to its primitive.
    ///
    /// Unknown names map to `string`: whatever the converter does, the URL
    /// segment it reads is text.
    #[must_use]
    pub fn map(&self, name: &str) -> TypeNode {
        let kind = self
            .builtins
            .get(name)
            .copied()
            .unwrap_or(PrimitiveKind::String);
        TypeNode::primitive(kind)
    }
}

impl Default for ConverterMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let mapper = ConverterMapper::new();
        for name in ["default", "string", "path", "uuid", "identifier", "any"] {
            assert_eq!(mapper.map(name), TypeNode::string(), "{name}");
        }
        assert_eq!(mapper.map("int"), TypeNode::integer());
        assert_eq!(mapper.map("integer"), TypeNode::integer());
        assert_eq!(mapper.map("float"), TypeNode::primitive(PrimitiveKind::Float));
    }

    #[test]
    fn test_custom_converters() {
        let mut mapper = ConverterMapper::new();
        mapper.register("date", RawType::Str);
        mapper.register("date", RawType::Int);
        assert_eq!(mapper.custom("date"), Some(&RawType::Int));
        assert_eq!(mapper.custom("int"), None);
        assert!(!mapper.is_builtin("date"));
    }
}
