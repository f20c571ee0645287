//! Top-level key extraction.

use object_basin_json_pointer::{first_component, unescape_component, JsonPointerError};

/// Returns the unescaped first segment of a canonical pointer.
///
/// ```
/// use object_basin::top_level_key;
///
/// assert_eq!(top_level_key("/a/b/c").unwrap(), "a");
/// assert_eq!(top_level_key("/weird~0~1~01key").unwrap(), "weird~/~1key");
/// ```
pub fn top_level_key(pointer: &str) -> Result<String, JsonPointerError> {
    first_component(pointer)
        .map(unescape_component)
        .ok_or(JsonPointerError::NoParent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_segment() {
        assert_eq!(top_level_key("/a/b/c").unwrap(), "a");
        assert_eq!(top_level_key("/a").unwrap(), "a");
        assert_eq!(top_level_key("/o~1k/0").unwrap(), "o/k");
        assert_eq!(top_level_key("/").unwrap(), "");
    }

    #[test]
    fn test_root_has_no_key() {
        assert_eq!(top_level_key(""), Err(JsonPointerError::NoParent));
    }
}
