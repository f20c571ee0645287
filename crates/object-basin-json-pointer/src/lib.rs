//! JSON Pointer (RFC 6901) helpers used by `object-basin`.
//!
//! A pointer is the canonical, slash-delimited address of a single location
//! in a document. Every patch operation issued against a basin is addressed
//! with one.
//!
//! # Example
//!
//! ```
//! use object_basin_json_pointer::{format_json_pointer, get, parse_json_pointer};
//!
//! let path = parse_json_pointer("/message/0");
//! assert_eq!(path, vec!["message".to_string(), "0".to_string()]);
//! assert_eq!(format_json_pointer(&path), "/message/0");
//!
//! let doc = serde_json::json!({"message": ["hello"]});
//! assert_eq!(get(&doc, &path), Some(&serde_json::json!("hello")));
//! ```

use serde_json::Value;
use thiserror::Error;

pub mod validate;
pub use validate::validate_json_pointer;

/// A decoded pointer: one unescaped string per step.
pub type Path = Vec<String>;

/// Pointer step that addresses the slot after the last array element.
pub const END_OF_ARRAY: &str = "-";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    #[error("NOT_FOUND")]
    NotFound,
    #[error("INVALID_INDEX")]
    InvalidIndex,
    #[error("NO_PARENT")]
    NoParent,
    #[error("POINTER_INVALID")]
    PointerInvalid,
    #[error("POINTER_TOO_LONG")]
    PointerTooLong,
}

/// Unescapes a JSON Pointer path component.
///
/// `~1` becomes `/` and `~0` becomes `~`, in that order, so `~01` decodes
/// to the literal `~1`.
///
/// ```
/// use object_basin_json_pointer::unescape_component;
///
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("~01"), "~1");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// ```
/// use object_basin_json_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("o/k"), "o~1k");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // `~` first, otherwise the `~` of `~1` would be escaped again.
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into unescaped path components.
///
/// The empty string is the root and yields no components. The leading `/`
/// is not checked here; use [`validate_json_pointer`] for untrusted input.
pub fn parse_json_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer
        .strip_prefix('/')
        .unwrap_or(pointer)
        .split('/')
        .map(unescape_component)
        .collect()
}

/// Format path components into a JSON Pointer string.
pub fn format_json_pointer<S: AsRef<str>>(path: &[S]) -> String {
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component.as_ref()));
    }
    out
}

/// Returns the first component of `pointer`, still escaped.
///
/// `None` for the root pointer, which has no components.
pub fn first_component(pointer: &str) -> Option<&str> {
    let rest = pointer.strip_prefix('/')?;
    Some(rest.split('/').next().unwrap_or(rest))
}

/// Check if a string represents a valid non-negative integer array index.
///
/// ```
/// use object_basin_json_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("12"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Parse an array step. `-` is resolved to `len`.
pub fn parse_index(step: &str, len: usize) -> Result<usize, JsonPointerError> {
    if step == END_OF_ARRAY {
        return Ok(len);
    }
    if !is_valid_index(step) {
        return Err(JsonPointerError::InvalidIndex);
    }
    step.parse().map_err(|_| JsonPointerError::InvalidIndex)
}

/// Get a value from a JSON document by path.
///
/// Returns `None` if the path doesn't exist or is invalid.
pub fn get<'a, S: AsRef<str>>(val: &'a Value, path: &[S]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        let step = step.as_ref();
        current = match current {
            Value::Array(arr) => {
                if step == END_OF_ARRAY {
                    return None;
                }
                arr.get(step.parse::<usize>().ok()?)?
            }
            Value::Object(map) => map.get(step)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Get a mutable reference to a value in a JSON document by path.
///
/// Returns `None` if the path doesn't exist or is invalid.
pub fn get_mut<'a, S: AsRef<str>>(val: &'a mut Value, path: &[S]) -> Option<&'a mut Value> {
    let mut current = val;
    for step in path {
        let step = step.as_ref();
        current = match current {
            Value::Array(arr) => {
                if step == END_OF_ARRAY {
                    return None;
                }
                arr.get_mut(step.parse::<usize>().ok()?)?
            }
            Value::Object(map) => map.get_mut(step)?,
            _ => return None,
        };
    }
    Some(current)
}
