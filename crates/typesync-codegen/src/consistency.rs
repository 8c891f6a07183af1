//! Path/argument consistency check.
//!
//! URL substitution is generated from the literal path pattern while the
//! Args type is generated from the declared arguments, so both must agree on
//! the same placeholder set before either is emitted.

use std::collections::HashSet;
use typesync_core::{Endpoint, Error, PathPattern, Result};

/// Compares the placeholders of `pattern` with the arguments declared on
/// `endpoint`.
///
/// # Errors
///
/// Returns [`Error::AmbiguousPath`] listing every placeholder without a
/// declared argument, every declared argument missing from the path, and
/// every placeholder used more than once.
///
/// # Examples
///
/// ```
/// use typesync_codegen::consistency::check_endpoint;
/// use typesync_core::{ArgumentSpec, Endpoint, RawType};
///
/// let ok = Endpoint::new("item", "/items/<int:id>").with_argument("id", ArgumentSpec::converter("int"));
/// assert!(check_endpoint(&ok, &ok.pattern().unwrap()).is_ok());
///
/// let bad = Endpoint::new("item", "/items/<int:id>").with_argument("key", ArgumentSpec::annotated(RawType::Str));
/// let err = check_endpoint(&bad, &bad.pattern().unwrap()).unwrap_err();
/// assert!(err.is_ambiguous_path());
/// ```
pub fn check_endpoint(endpoint: &Endpoint, pattern: &PathPattern) -> Result<()> {
    let mut seen = HashSet::new();
    let mut problems = Vec::new();

    for placeholder in pattern.placeholder_names() {
        if !seen.insert(placeholder) {
            problems.push(format!("placeholder '{placeholder}' appears more than once"));
        } else if !endpoint.arguments.contains_key(placeholder) {
            problems.push(format!("placeholder '{placeholder}' has no declared argument"));
        }
    }
    for argument in endpoint.arguments.keys() {
        if !seen.contains(argument.as_str()) {
            problems.push(format!("argument '{argument}' does not appear in the path"));
        }
    }

    if problems.is_empty() {
        return Ok(());
    }
    Err(Error::AmbiguousPath {
        endpoint: endpoint.derived_name().into_inner(),
        reason: problems.join("; "),
    })
}
