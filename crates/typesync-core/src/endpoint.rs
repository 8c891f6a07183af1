//! Endpoint descriptors and path patterns.
//!
//! An [`Endpoint`] is the complete description of one routable operation as
//! collected from the host framework: its path pattern, methods, argument
//! and body types, and return type. Descriptors are immutable once built.
//!
//! # Examples
//!
//! ```
//! use typesync_core::{ArgumentSpec, Endpoint, HttpMethod, RawType};
//!
//! let endpoint = Endpoint::new("with_args", "/with/<boolean:arg>/args")
//!     .with_methods([HttpMethod::Get])
//!     .with_argument("arg", ArgumentSpec::annotated(RawType::Bool))
//!     .returning(RawType::Int);
//!
//! let pattern = endpoint.pattern().unwrap();
//! assert_eq!(pattern.placeholder_names().collect::<Vec<_>>(), vec!["arg"]);
//! ```

use crate::{EndpointName, Error, HttpMethod, RawType, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One routable operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Framework endpoint identifier, e.g. `users.detail`
    pub endpoint: String,
    /// Path pattern with `<name>` or `<converter:name>` placeholders
    pub path: String,
    /// Declared HTTP methods
    #[serde(default = "default_methods")]
    pub methods: Vec<HttpMethod>,
    /// Declared arguments keyed by placeholder name
    #[serde(default)]
    pub arguments: IndexMap<String, ArgumentSpec>,
    /// Request body, if the view accepts one
    #[serde(default)]
    pub body: Option<BodySpec>,
    /// Return type descriptor, absent for unannotated views
    #[serde(default)]
    pub returns: Option<RawType>,
    /// Visibility, naming, and ignore directives
    #[serde(default)]
    pub meta: EndpointMeta,
}

fn default_methods() -> Vec<HttpMethod> {
    vec![HttpMethod::Get]
}

impl Endpoint {
    /// Creates a GET endpoint with no arguments, body, or return type.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            path: path.into(),
            methods: default_methods(),
            arguments: IndexMap::new(),
            body: None,
            returns: None,
            meta: EndpointMeta::default(),
        }
    }

    /// Replaces the declared methods.
    #[must_use]
    pub fn with_methods(mut self, methods: impl IntoIterator<Item = HttpMethod>) -> Self {
        self.methods = methods.into_iter().collect();
        self
    }

    /// Declares an argument.
    #[must_use]
    pub fn with_argument(mut self, name: impl Into<String>, spec: ArgumentSpec) -> Self {
        self.arguments.insert(name.into(), spec);
        self
    }

    /// Declares a JSON body under the default `json` key.
    #[must_use]
    pub fn with_body(mut self, ty: RawType) -> Self {
        self.body = Some(BodySpec {
            key: default_body_key(),
            ty,
        });
        self
    }

    /// Sets the return type.
    #[must_use]
    pub fn returning(mut self, ty: RawType) -> Self {
        self.returns = Some(ty);
        self
    }

    /// Replaces the extension metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: EndpointMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Name used as the base of every generated identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use typesync_core::{Endpoint, EndpointMeta};
    ///
    /// let e = Endpoint::new("api.items", "/items");
    /// assert_eq!(e.derived_name().as_str(), "api_items");
    ///
    /// let renamed = e.with_meta(EndpointMeta { name: Some("list_items".into()), ..Default::default() });
    /// assert_eq!(renamed.derived_name().as_str(), "list_items");
    /// ```
    #[must_use]
    pub fn derived_name(&self) -> EndpointName {
        self.meta
            .name
            .as_deref()
            .map_or_else(|| EndpointName::from_endpoint(&self.endpoint), EndpointName::new)
    }

    /// Parses the path pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDescriptor`] if a placeholder is malformed.
    pub fn pattern(&self) -> Result<PathPattern> {
        PathPattern::parse(&self.path)
    }

    /// Declared methods, deduplicated, in canonical order.
    #[must_use]
    pub fn canonical_methods(&self) -> Vec<HttpMethod> {
        let mut methods = self.methods.clone();
        methods.sort();
        methods.dedup();
        methods
    }
}

/// How a path argument gets its type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    /// Converter name, overriding the one written in the placeholder
    #[serde(default)]
    pub converter: Option<String>,
    /// Annotation on the view function parameter
    #[serde(default)]
    pub annotation: Option<RawType>,
}

impl ArgumentSpec {
    /// An argument typed by its converter.
    #[must_use]
    pub fn converter(name: impl Into<String>) -> Self {
        Self {
            converter: Some(name.into()),
            annotation: None,
        }
    }

    /// An argument typed by its annotation.
    #[must_use]
    pub const fn annotated(ty: RawType) -> Self {
        Self {
            converter: None,
            annotation: Some(ty),
        }
    }
}

/// JSON request body accepted by a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodySpec {
    /// Keyword the view receives the body under
    #[serde(default = "default_body_key")]
    pub key: String,
    /// Body type
    #[serde(rename = "type")]
    pub ty: RawType,
}

fn default_body_key() -> String {
    "json".to_string()
}

/// Extension directives attached to an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointMeta {
    /// Leave the endpoint out of the generated client entirely
    #[serde(default)]
    pub ignore: bool,
    /// Override for the derived name
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the endpoint belongs to the public client
    #[serde(default)]
    pub visibility: Visibility,
}

/// Endpoint visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Always emitted
    #[default]
    Public,
    /// Emitted only when internal endpoints are requested
    Internal,
}

/// One piece of a parsed path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Literal text
    Static(String),
    /// `<converter:name>` placeholder
    Placeholder {
        /// Argument name
        name: String,
        /// Converter written in the pattern, if any
        converter: Option<String>,
    },
}

/// A parsed path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<PathSegment>,
}

impl PathPattern {
    /// Parses a pattern such as `/users/<int:id>/posts/<slug>`.
    ///
    /// Converter arguments (`<string(length=2):code>`) are accepted and
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDescriptor`] for an unterminated placeholder or
    /// a placeholder name that is not an identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use typesync_core::{PathPattern, PathSegment};
    ///
    /// let pattern = PathPattern::parse("/users/<int:id>").unwrap();
    /// assert_eq!(
    ///     pattern.segments()[1],
    ///     PathSegment::Placeholder { name: "id".into(), converter: Some("int".into()) }
    /// );
    /// assert!(PathPattern::parse("/users/<id").is_err());
    /// ```
    pub fn parse(path: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = path;

        while let Some(start) = rest.find('<') {
            if start > 0 {
                segments.push(PathSegment::Static(rest[..start].to_string()));
            }
            let after = &rest[start + 1..];
            let end = after.find('>').ok_or_else(|| Error::InvalidDescriptor {
                subject: path.to_string(),
                reason: "unterminated placeholder".to_string(),
            })?;
            segments.push(Self::parse_placeholder(path, &after[..end])?);
            rest = &after[end + 1..];
        }
        if !rest.is_empty() {
            segments.push(PathSegment::Static(rest.to_string()));
        }

        Ok(Self { segments })
    }

    fn parse_placeholder(path: &str, content: &str) -> Result<PathSegment> {
        let (converter, name) = match content.rsplit_once(':') {
            Some((conv, name)) => {
                let conv = conv.split('(').next().unwrap_or(conv).trim();
                (Some(conv.to_string()), name.trim())
            }
            None => (None, content.trim()),
        };

        let valid = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(Error::InvalidDescriptor {
                subject: path.to_string(),
                reason: format!("'{name}' is not a valid placeholder name"),
            });
        }

        Ok(PathSegment::Placeholder {
            name: name.to_string(),
            converter: converter.filter(|c| !c.is_empty()),
        })
    }

    /// Segments in pattern order.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Placeholder names in pattern order, duplicates included.
    pub fn placeholder_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            PathSegment::Placeholder { name, .. } => Some(name.as_str()),
            PathSegment::Static(_) => None,
        })
    }

    /// Converter written in the pattern for `name`.
    #[must_use]
    pub fn converter_for(&self, name: &str) -> Option<&str> {
        self.segments.iter().find_map(|s| match s {
            PathSegment::Placeholder {
                name: n,
                converter,
            } if n == name => converter.as_deref(),
            _ => None,
        })
    }

    /// Returns `true` if the pattern has no placeholders.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.placeholder_names().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_static_path() {
        let p = PathPattern::parse("/main").unwrap();
        assert_eq!(p.segments(), &[PathSegment::Static("/main".into())]);
        assert!(p.is_static());
    }

    #[test]
    fn test_parse_placeholders() {
        let p = PathPattern::parse("/with/<boolean:arg>/args/<rest>").unwrap();
        assert_eq!(p.placeholder_names().collect::<Vec<_>>(), vec!["arg", "rest"]);
        assert_eq!(p.converter_for("arg"), Some("boolean"));
        assert_eq!(p.converter_for("rest"), None);
        assert_eq!(
            p.segments().last(),
            Some(&PathSegment::Placeholder {
                name: "rest".into(),
                converter: None
            })
        );
    }

    #[test]
    fn test_parse_converter_arguments() {
        let p = PathPattern::parse("/lang/<string(length=2):code>").unwrap();
        assert_eq!(p.converter_for("code"), Some("string"));
    }

    #[test]
    fn test_parse_rejects_bad_names() {
        assert!(PathPattern::parse("/a/<int:>").is_err());
        assert!(PathPattern::parse("/a/<1abc>").is_err());
        assert!(PathPattern::parse("/a/<x-y>").is_err());
    }

    #[test]
    fn test_parse_unterminated() {
        let err = PathPattern::parse("/a/<int:id").unwrap_err();
        assert!(err.is_invalid_descriptor());
    }

    #[test]
    fn test_canonical_methods() {
        let e = Endpoint::new("main", "/main").with_methods([
            HttpMethod::Post,
            HttpMethod::Get,
            HttpMethod::Post,
        ]);
        assert_eq!(e.canonical_methods(), vec![HttpMethod::Get, HttpMethod::Post]);
    }

    #[test]
    fn test_deserialize_endpoint_defaults() {
        let e: Endpoint = serde_json::from_value(json!({
            "endpoint": "pytest",
            "path": "/pytest",
            "body": {"type": {"kind": "int"}},
            "returns": {"kind": "str"}
        }))
        .unwrap();
        assert_eq!(e.methods, vec![HttpMethod::Get]);
        assert_eq!(e.body.as_ref().unwrap().key, "json");
        assert_eq!(e.meta.visibility, Visibility::Public);
        assert!(!e.meta.ignore);
    }

    #[test]
    fn test_deserialize_arguments_preserve_order() {
        let e: Endpoint = serde_json::from_value(json!({
            "endpoint": "x",
            "path": "/<b>/<a>",
            "arguments": {
                "b": {"converter": "int"},
                "a": {"annotation": {"kind": "str"}}
            }
        }))
        .unwrap();
        let names: Vec<_> = e.arguments.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
