//! Identifier case conversion and name maps for format strings.
//!
//! # Examples
//!
//! ```
//! use typesync_codegen::naming;
//!
//! assert_eq!(naming::to_camel_case("users_detail"), "usersDetail");
//! assert_eq!(naming::to_pascal_case("users_detail"), "UsersDetail");
//! assert_eq!(naming::to_snake_case("UsersDetail"), "users_detail");
//! ```

use serde_json::{Map, Value};
use std::borrow::Cow;

fn words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in name.chars() {
        if !ch.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_ascii_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
    }
}

/// Converts a snake_case (or dotted, or kebab) name to camelCase.
///
/// Existing inner capitals are kept, so `getHTTP_status` becomes
/// `getHTTPStatus`.
///
/// # Examples
///
/// ```
/// use typesync_codegen::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("send_message"), "sendMessage");
/// assert_eq!(to_camel_case("hello"), "hello");
/// ```
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let pascal = to_pascal_case(name);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
    }
}

/// Converts a name to PascalCase.
///
/// # Examples
///
/// ```
/// use typesync_codegen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("send_message"), "SendMessage");
/// assert_eq!(to_pascal_case("SelfRef"), "SelfRef");
/// assert_eq!(to_pascal_case("Tree[int]"), "TreeInt");
/// ```
#[must_use]
pub fn to_pascal_case(name: &str) -> String {
    words(name).iter().map(|w| capitalize(w)).collect()
}

/// Converts a name to snake_case.
///
/// # Examples
///
/// ```
/// use typesync_codegen::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("getUserData"), "get_user_data");
/// assert_eq!(to_snake_case("api.items"), "api_items");
/// ```
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    words(name)
        .iter()
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Builds the placeholder map available to naming format strings.
///
/// Keys are `d`, `cc`, `pc`, `sc`, `uc` and `lc`, each prefixed with
/// `prefix`.
///
/// # Examples
///
/// ```
/// use typesync_codegen::naming::name_map;
///
/// let map = name_map("users_detail", "");
/// assert_eq!(map["pc"], "UsersDetail");
/// assert_eq!(map["uc"], "USERS_DETAIL");
///
/// let method = name_map("GET", "m_");
/// assert_eq!(method["m_lc"], "get");
/// ```
#[must_use]
pub fn name_map(name: &str, prefix: &str) -> Map<String, Value> {
    let mut map = Map::new();
    let mut put = |key: &str, value: String| {
        map.insert(format!("{prefix}{key}"), Value::String(value));
    };
    put("d", name.to_string());
    let base = unshout(name);
    put("cc", to_camel_case(&base));
    put("pc", to_pascal_case(&base));
    put("sc", to_snake_case(name));
    put("uc", name.to_ascii_uppercase());
    put("lc", name.to_ascii_lowercase());
    map
}

/// Name map for a request function: route keys under `r_`, method keys
/// under `m_`, and the route keys again unprefixed.
#[must_use]
pub fn function_name_map(route: &str, method: &str) -> Map<String, Value> {
    let mut map = name_map(route, "");
    map.extend(name_map(route, "r_"));
    map.extend(name_map(method, "m_"));
    map
}

// `GET` camelizes to `get`, not `gET`
fn unshout(name: &str) -> Cow<'_, str> {
    if name.chars().any(|c| c.is_ascii_lowercase()) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(name.to_ascii_lowercase())
    }
}

/// Returns `true` if `name` can be used as a bare TypeScript identifier.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
