//! Raw type descriptors.
//!
//! These mirror the annotations of the backend being bridged from, as
//! produced by an upstream extractor. Classification happens on the enum
//! variant; the only free-form names are references into
//! [`TypeDefinitions`] and opaque class paths, which only extension
//! translators are expected to understand.
//!
//! # Examples
//!
//! ```
//! use typesync_core::RawType;
//!
//! let raw = RawType::tuple(vec![RawType::Int, RawType::named("SelfRef")]);
//! assert_eq!(raw.to_string(), "tuple[int, SelfRef]");
//!
//! let json = serde_json::json!({"kind": "list", "args": [{"kind": "str"}]});
//! let parsed: RawType = serde_json::from_value(json).unwrap();
//! assert_eq!(parsed, RawType::list(RawType::Str));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A raw type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawType {
    /// `int`
    Int,
    /// `float`
    Float,
    /// `str`
    Str,
    /// `bool`
    Bool,
    /// `None`
    #[serde(rename = "none")]
    NoneType,
    /// `bytes`
    Bytes,
    /// `Any`
    Any,
    /// `Never`
    Never,
    /// `...`, the variadic marker inside `tuple[X, ...]`
    Ellipsis,
    /// `list` / `list[T]`
    List {
        /// Type arguments, empty for a bare `list`
        #[serde(default)]
        args: Vec<RawType>,
    },
    /// `set[T]` / `frozenset[T]`
    Set {
        /// Type arguments
        #[serde(default)]
        args: Vec<RawType>,
    },
    /// `tuple[...]`
    Tuple {
        /// Element types, possibly ending in `Ellipsis`
        #[serde(default)]
        args: Vec<RawType>,
    },
    /// `dict[K, V]`
    Dict {
        /// Key and value types
        #[serde(default)]
        args: Vec<RawType>,
    },
    /// `A | B` / `Union[A, B]`
    Union {
        /// Variants in declaration order
        #[serde(default)]
        args: Vec<RawType>,
    },
    /// `Optional[T]`
    Optional {
        /// The wrapped type
        #[serde(default)]
        args: Vec<RawType>,
    },
    /// `Literal[...]`
    Literal {
        /// Constant values in declaration order
        #[serde(default)]
        values: Vec<LiteralValue>,
    },
    /// Reference to a declaration in [`TypeDefinitions`]
    Named {
        /// Declared name
        name: String,
        /// Generic arguments
        #[serde(default)]
        args: Vec<RawType>,
    },
    /// An unbound generic parameter
    TypeVar {
        /// Parameter name
        name: String,
    },
    /// An opaque class the extractor could not describe structurally
    Class {
        /// Fully qualified class path, e.g. `datetime.datetime`
        path: String,
        /// Generic arguments
        #[serde(default)]
        args: Vec<RawType>,
    },
}

impl RawType {
    /// `list[element]`
    #[must_use]
    pub fn list(element: Self) -> Self {
        Self::List {
            args: vec![element],
        }
    }

    /// `set[element]`
    #[must_use]
    pub fn set(element: Self) -> Self {
        Self::Set {
            args: vec![element],
        }
    }

    /// `tuple[elements...]`
    #[must_use]
    pub fn tuple(elements: Vec<Self>) -> Self {
        Self::Tuple { args: elements }
    }

    /// `dict[key, value]`
    #[must_use]
    pub fn dict(key: Self, value: Self) -> Self {
        Self::Dict {
            args: vec![key, value],
        }
    }

    /// `Union[variants...]`
    #[must_use]
    pub fn union(variants: Vec<Self>) -> Self {
        Self::Union { args: variants }
    }

    /// `Optional[inner]`
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional { args: vec![inner] }
    }

    /// `Literal[values...]`
    #[must_use]
    pub fn literal(values: Vec<LiteralValue>) -> Self {
        Self::Literal { values }
    }

    /// Reference to a non-generic declaration.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Reference to a generic declaration with arguments.
    #[must_use]
    pub fn generic(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Named {
            name: name.into(),
            args,
        }
    }

    /// An unbound type variable.
    #[must_use]
    pub fn type_var(name: impl Into<String>) -> Self {
        Self::TypeVar { name: name.into() }
    }

    /// An opaque class.
    #[must_use]
    pub fn class(path: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Class {
            path: path.into(),
            args,
        }
    }

    /// Replaces type variables bound in `bindings`, leaving others in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use typesync_core::RawType;
    ///
    /// let body = RawType::list(RawType::type_var("T"));
    /// let bindings = HashMap::from([("T".to_string(), RawType::Int)]);
    /// assert_eq!(body.substitute(&bindings), RawType::list(RawType::Int));
    /// ```
    #[must_use]
    pub fn substitute(&self, bindings: &HashMap<String, Self>) -> Self {
        let sub = |args: &[Self]| -> Vec<Self> {
            args.iter().map(|a| a.substitute(bindings)).collect()
        };
        match self {
            Self::TypeVar { name } => bindings.get(name).cloned().unwrap_or_else(|| self.clone()),
            Self::List { args } => Self::List { args: sub(args) },
            Self::Set { args } => Self::Set { args: sub(args) },
            Self::Tuple { args } => Self::Tuple { args: sub(args) },
            Self::Dict { args } => Self::Dict { args: sub(args) },
            Self::Union { args } => Self::Union { args: sub(args) },
            Self::Optional { args } => Self::Optional { args: sub(args) },
            Self::Named { name, args } => Self::Named {
                name: name.clone(),
                args: sub(args),
            },
            Self::Class { path, args } => Self::Class {
                path: path.clone(),
                args: sub(args),
            },
            other => other.clone(),
        }
    }

    /// Type arguments of a parameterized descriptor, empty for scalars.
    #[must_use]
    pub fn args(&self) -> &[Self] {
        match self {
            Self::List { args }
            | Self::Set { args }
            | Self::Tuple { args }
            | Self::Dict { args }
            | Self::Union { args }
            | Self::Optional { args }
            | Self::Named { args, .. }
            | Self::Class { args, .. } => args,
            _ => &[],
        }
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, head: &str, args: &[RawType]) -> fmt::Result {
    f.write_str(head)?;
    if args.is_empty() {
        return Ok(());
    }
    f.write_str("[")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{arg}")?;
    }
    f.write_str("]")
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Str => f.write_str("str"),
            Self::Bool => f.write_str("bool"),
            Self::NoneType => f.write_str("None"),
            Self::Bytes => f.write_str("bytes"),
            Self::Any => f.write_str("Any"),
            Self::Never => f.write_str("Never"),
            Self::Ellipsis => f.write_str("..."),
            Self::List { args } => write_args(f, "list", args),
            Self::Set { args } => write_args(f, "set", args),
            Self::Tuple { args } => write_args(f, "tuple", args),
            Self::Dict { args } => write_args(f, "dict", args),
            Self::Union { args } => write_args(f, "Union", args),
            Self::Optional { args } => write_args(f, "Optional", args),
            Self::Literal { values } => {
                f.write_str("Literal[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            Self::Named { name, args } => write_args(f, name, args),
            Self::TypeVar { name } => f.write_str(name),
            Self::Class { path, args } => write_args(f, path, args),
        }
    }
}

/// A constant admitted by `Literal[...]` or an enumeration member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    /// `None`
    Null,
    /// `True` / `False`
    Bool(bool),
    /// Integer constant
    Int(i64),
    /// String constant
    Str(String),
}

impl LiteralValue {
    /// Convenience constructor for string literals.
    #[must_use]
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("None"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

/// One key of a typed dict declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Key name
    pub name: String,
    /// Value type
    #[serde(rename = "type")]
    pub ty: RawType,
    /// `false` for `NotRequired[...]` keys
    #[serde(default = "default_required")]
    pub required: bool,
}

const fn default_required() -> bool {
    true
}

/// A named declaration a [`RawType::Named`] can point at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDef {
    /// `type Name[params] = value`
    Alias {
        /// Generic parameters
        #[serde(default)]
        params: Vec<String>,
        /// Aliased type
        value: RawType,
    },
    /// `class Name[params](TypedDict): ...`
    TypedDict {
        /// Generic parameters
        #[serde(default)]
        params: Vec<String>,
        /// Keys in declaration order
        fields: Vec<FieldDef>,
    },
    /// Enumeration-like declaration, translated to its member values
    Enum {
        /// Member values in declaration order
        members: Vec<LiteralValue>,
    },
}

impl TypeDef {
    /// Generic parameters of the declaration.
    #[must_use]
    pub fn params(&self) -> &[String] {
        match self {
            Self::Alias { params, .. } | Self::TypedDict { params, .. } => params,
            Self::Enum { .. } => &[],
        }
    }

    /// Binds the declaration's parameters to `args`.
    ///
    /// Missing arguments bind to `Any`; surplus arguments are ignored.
    #[must_use]
    pub fn bind(&self, args: &[RawType]) -> HashMap<String, RawType> {
        self.params()
            .iter()
            .enumerate()
            .map(|(i, p)| (p.clone(), args.get(i).cloned().unwrap_or(RawType::Any)))
            .collect()
    }
}

/// Ordered table of named declarations, keyed by declared name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeDefinitions(IndexMap<String, TypeDef>);

impl TypeDefinitions {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Adds or replaces a declaration.
    pub fn insert(&mut self, name: impl Into<String>, def: TypeDef) {
        self.0.insert(name.into(), def);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, def: TypeDef) -> Self {
        self.insert(name, def);
        self
    }

    /// Looks up a declaration.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.0.get(name)
    }

    /// Iterates in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypeDef)> {
        self.0.iter()
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
