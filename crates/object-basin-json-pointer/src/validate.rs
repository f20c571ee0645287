//! Checks for pointers that arrive from outside, such as decoded patches.

use crate::JsonPointerError;

const MAX_POINTER_LENGTH: usize = 1024;

/// Check that `pointer` is rooted, within length, and uses only the `~0`
/// and `~1` escapes.
///
/// ```
/// use object_basin_json_pointer::validate_json_pointer;
///
/// validate_json_pointer("").unwrap();
/// validate_json_pointer("/object/list/-").unwrap();
/// validate_json_pointer("object").unwrap_err();
/// validate_json_pointer("/a~2b").unwrap_err();
/// ```
pub fn validate_json_pointer(pointer: &str) -> Result<(), JsonPointerError> {
    if pointer.len() > MAX_POINTER_LENGTH {
        return Err(JsonPointerError::PointerTooLong);
    }
    if !pointer.is_empty() && !pointer.starts_with('/') {
        return Err(JsonPointerError::PointerInvalid);
    }

    let mut bytes = pointer.bytes();
    while let Some(b) = bytes.next() {
        if b == b'~' && !matches!(bytes.next(), Some(b'0' | b'1')) {
            return Err(JsonPointerError::PointerInvalid);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rooted_pointers() {
        for pointer in ["", "/", "/foo/bar", "/weird~0~1~01key", "/list/-"] {
            assert!(validate_json_pointer(pointer).is_ok(), "{pointer}");
        }
    }

    #[test]
    fn test_bad_escapes() {
        for pointer in ["/a~", "/a~2", "/~x/b"] {
            assert_eq!(
                validate_json_pointer(pointer),
                Err(JsonPointerError::PointerInvalid),
                "{pointer}"
            );
        }
    }

    #[test]
    fn test_relative_and_long() {
        assert_eq!(
            validate_json_pointer("foo/bar"),
            Err(JsonPointerError::PointerInvalid)
        );
        let long = format!("/{}", "a".repeat(MAX_POINTER_LENGTH));
        assert_eq!(
            validate_json_pointer(&long),
            Err(JsonPointerError::PointerTooLong)
        );
    }
}
