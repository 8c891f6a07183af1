//! The canonical, language-neutral type graph.

use serde::Serialize;
use typesync_core::LiteralValue;

/// Closed set of primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    /// Integral number
    Integer,
    /// Floating point number
    Float,
    /// Text
    String,
    /// `true` / `false`
    Boolean,
    /// The null value
    Null,
    /// Byte sequence, carried as text on the wire
    Bytes,
    /// Any value, explicitly requested
    Any,
    /// No value can inhabit the type
    Never,
    /// Absence of a value (endpoints without arguments)
    Undefined,
}

/// One key of an [`TypeNode::Object`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Field {
    /// Key name
    pub name: String,
    /// Value type
    pub node: TypeNode,
    /// `false` if the key may be absent
    pub required: bool,
}

impl Field {
    /// A required field.
    #[must_use]
    pub fn required(name: impl Into<String>, node: TypeNode) -> Self {
        Self {
            name: name.into(),
            node,
            required: true,
        }
    }
}

/// A node of the canonical type graph.
///
/// The graph is a tree: cycles only exist through a [`Reference`] naming an
/// alias whose [`NamedAlias`] definition is declared separately.
///
/// [`Reference`]: TypeNode::Reference
/// [`NamedAlias`]: TypeNode::NamedAlias
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeNode {
    /// A primitive
    Primitive {
        /// Which primitive
        primitive: PrimitiveKind,
    },
    /// `inner | null`
    Optional {
        /// The non-null type
        inner: Box<TypeNode>,
    },
    /// Ordered, structurally distinct variants
    Union {
        /// Variants in declaration order
        variants: Vec<TypeNode>,
    },
    /// Homogeneous list
    List {
        /// Element type
        element: Box<TypeNode>,
    },
    /// Fixed-length tuple, or a tuple whose last element repeats
    Tuple {
        /// Element types in order
        elements: Vec<TypeNode>,
        /// The last element may repeat any number of times
        variadic: bool,
    },
    /// Mapping from keys to values
    Dict {
        /// Key type
        key: Box<TypeNode>,
        /// Value type
        value: Box<TypeNode>,
    },
    /// Ordered set of constants
    Literal {
        /// Distinct values in declaration order
        values: Vec<LiteralValue>,
    },
    /// Record with named keys
    Object {
        /// Keys in declaration order
        fields: Vec<Field>,
    },
    /// First occurrence of a self-referential shape
    NamedAlias {
        /// Alias name
        name: String,
        /// Resolved definition
        definition: Box<TypeNode>,
    },
    /// Indirection to a declared alias
    Reference {
        /// Alias name
        name: String,
    },
    /// A shape no translator understood
    Unknown {
        /// Why translation failed
        reason: String,
    },
}

impl TypeNode {
    /// A primitive node.
    #[must_use]
    pub const fn primitive(primitive: PrimitiveKind) -> Self {
        Self::Primitive { primitive }
    }

    /// `integer`
    #[must_use]
    pub const fn integer() -> Self {
        Self::primitive(PrimitiveKind::Integer)
    }

    /// `string`
    #[must_use]
    pub const fn string() -> Self {
        Self::primitive(PrimitiveKind::String)
    }

    /// `boolean`
    #[must_use]
    pub const fn boolean() -> Self {
        Self::primitive(PrimitiveKind::Boolean)
    }

    /// `any`
    #[must_use]
    pub const fn any() -> Self {
        Self::primitive(PrimitiveKind::Any)
    }

    /// `inner | null`
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional {
            inner: Box::new(inner),
        }
    }

    /// `element[]`
    #[must_use]
    pub fn list(element: Self) -> Self {
        Self::List {
            element: Box::new(element),
        }
    }

    /// Fixed-length tuple.
    #[must_use]
    pub const fn tuple(elements: Vec<Self>) -> Self {
        Self::Tuple {
            elements,
            variadic: false,
        }
    }

    /// `Record<key, value>`
    #[must_use]
    pub fn dict(key: Self, value: Self) -> Self {
        Self::Dict {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Reference to a declared alias.
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference { name: name.into() }
    }

    /// A degraded node.
    #[must_use]
    pub fn unknown(reason: impl Into<String>) -> Self {
        Self::Unknown {
            reason: reason.into(),
        }
    }

    /// Literal node over distinct values, declaration order kept.
    ///
    /// An empty set yields `never`.
    #[must_use]
    pub fn literal(values: impl IntoIterator<Item = LiteralValue>) -> Self {
        let mut distinct: Vec<LiteralValue> = Vec::new();
        for value in values {
            if !distinct.contains(&value) {
                distinct.push(value);
            }
        }
        if distinct.is_empty() {
            return Self::primitive(PrimitiveKind::Never);
        }
        Self::Literal { values: distinct }
    }

    /// Normalized union.
    ///
    /// Nested unions are flattened and structurally equal variants removed,
    /// first occurrence wins. A union of exactly one non-null type and
    /// `null` becomes [`TypeNode::Optional`]; a single variant is returned
    /// as is; no variants yields `never`.
    ///
    /// # Examples
    ///
    /// ```
    /// use typesync_codegen::graph::{PrimitiveKind, TypeNode};
    ///
    /// let null = TypeNode::primitive(PrimitiveKind::Null);
    /// let node = TypeNode::union(vec![TypeNode::integer(), null, TypeNode::integer()]);
    /// assert_eq!(node, TypeNode::optional(TypeNode::integer()));
    /// ```
    #[must_use]
    pub fn union(variants: impl IntoIterator<Item = Self>) -> Self {
        let mut flat: Vec<Self> = Vec::new();
        let push = |node: Self, flat: &mut Vec<Self>| {
            if !flat.contains(&node) {
                flat.push(node);
            }
        };
        for variant in variants {
            match variant {
                Self::Union { variants } => {
                    for inner in variants {
                        push(inner, &mut flat);
                    }
                }
                Self::Optional { inner } => {
                    push(*inner, &mut flat);
                    push(Self::primitive(PrimitiveKind::Null), &mut flat);
                }
                other => push(other, &mut flat),
            }
        }

        let null = Self::primitive(PrimitiveKind::Null);
        match flat.len() {
            0 => Self::primitive(PrimitiveKind::Never),
            1 => flat.remove(0),
            2 if flat.contains(&null) => {
                let other = flat.into_iter().find(|n| *n != null);
                other.map_or_else(|| Self::primitive(PrimitiveKind::Null), Self::optional)
            }
            _ => Self::Union { variants: flat },
        }
    }

    /// Returns `true` for the `undefined` primitive.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(
            self,
            Self::Primitive {
                primitive: PrimitiveKind::Undefined
            }
        )
    }

    /// Child nodes, not following alias definitions.
    fn children(&self) -> Vec<&Self> {
        match self {
            Self::Optional { inner } => vec![inner],
            Self::List { element } => vec![element],
            Self::Union { variants } => variants.iter().collect(),
            Self::Tuple { elements, .. } => elements.iter().collect(),
            Self::Dict { key, value } => vec![key, value],
            Self::Object { fields } => fields.iter().map(|f| &f.node).collect(),
            Self::NamedAlias { definition, .. } => vec![definition],
            Self::Primitive { .. }
            | Self::Literal { .. }
            | Self::Reference { .. }
            | Self::Unknown { .. } => Vec::new(),
        }
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Names of every alias this node points at, via `Reference` or an
    /// inline `NamedAlias`.
    #[must_use]
    pub fn alias_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.walk(&mut |node| match node {
            Self::Reference { name } | Self::NamedAlias { name, .. } => names.push(name.as_str()),
            _ => {}
        });
        names
    }

    /// Returns `true` if `name` is reachable from this node through
    /// unions and optionals alone.
    ///
    /// An alias whose definition does this has no structure to stop the
    /// recursion and cannot be declared.
    ///
    /// # Examples
    ///
    /// ```
    /// use typesync_codegen::graph::TypeNode;
    ///
    /// assert!(TypeNode::optional(TypeNode::reference("A")).refers_directly_to("A"));
    /// assert!(!TypeNode::list(TypeNode::reference("A")).refers_directly_to("A"));
    /// ```
    #[must_use]
    pub fn refers_directly_to(&self, name: &str) -> bool {
        match self {
            Self::Reference { name: target } | Self::NamedAlias { name: target, .. } => target == name,
            Self::Optional { inner } => inner.refers_directly_to(name),
            Self::Union { variants } => variants.iter().any(|v| v.refers_directly_to(name)),
            _ => false,
        }
    }

    /// Returns `true` if the tree contains a `Reference`.
    #[must_use]
    pub fn contains_reference(&self) -> bool {
        let mut found = false;
        self.walk(&mut |node| found |= matches!(node, Self::Reference { .. }));
        found
    }

    /// Number of `Unknown` nodes in the tree.
    #[must_use]
    pub fn unknown_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node| {
            if matches!(node, Self::Unknown { .. }) {
                count += 1;
            }
        });
        count
    }
}
