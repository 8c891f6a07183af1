//! Strong domain types for typesync.
//!
//! Newtypes keep derived endpoint names from being mixed up with raw
//! framework endpoint identifiers or arbitrary strings.
//!
//! # Examples
//!
//! ```
//! use typesync_core::{EndpointName, HttpMethod};
//!
//! let name = EndpointName::from_endpoint("users.detail");
//! assert_eq!(name.as_str(), "users_detail");
//! assert_eq!(HttpMethod::Get.as_str(), "GET");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Derived endpoint name (newtype over String).
///
/// Host frameworks namespace endpoints with dots (`blueprint.view`); the
/// derived name replaces them with underscores so it can be used as the
/// base for identifiers in generated code.
///
/// # Examples
///
/// ```
/// use typesync_core::EndpointName;
///
/// let name = EndpointName::new("main");
/// assert_eq!(name.as_str(), "main");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EndpointName(String);

impl EndpointName {
    /// Creates a name from an already-derived string.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Derives a name from a framework endpoint identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use typesync_core::EndpointName;
    ///
    /// assert_eq!(EndpointName::from_endpoint("api.v1.items").as_str(), "api_v1_items");
    /// ```
    #[must_use]
    pub fn from_endpoint(endpoint: &str) -> Self {
        Self(endpoint.replace('.', "_"))
    }

    /// Returns the name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `EndpointName` and returns the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EndpointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EndpointName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// HTTP method of an endpoint.
///
/// The declaration order is the canonical emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

impl HttpMethod {
    /// All methods in canonical order.
    pub const ALL: [Self; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Delete,
        Self::Head,
        Self::Options,
    ];

    /// Returns the upper-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| crate::Error::InvalidDescriptor {
                subject: s.to_string(),
                reason: "unknown HTTP method".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_name_from_endpoint() {
        assert_eq!(EndpointName::from_endpoint("main").as_str(), "main");
        assert_eq!(
            EndpointName::from_endpoint("admin.users.list").as_str(),
            "admin_users_list"
        );
    }

    #[test]
    fn test_endpoint_name_display() {
        let name = EndpointName::new("with_args");
        assert_eq!(format!("{name}"), "with_args");
        assert_eq!(name.into_inner(), "with_args");
    }

    #[test]
    fn test_http_method_order() {
        let mut methods = vec![HttpMethod::Delete, HttpMethod::Get, HttpMethod::Post];
        methods.sort();
        assert_eq!(
            methods,
            vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete]
        );
    }

    #[test]
    fn test_http_method_parse() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("PATCH".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert!("FETCH".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_http_method_serde() {
        let json = serde_json::to_string(&HttpMethod::Options).unwrap();
        assert_eq!(json, "\"OPTIONS\"");
        let back: HttpMethod = serde_json::from_str("\"PUT\"").unwrap();
        assert_eq!(back, HttpMethod::Put);
    }
}
