//! Per-basin configuration.

use object_basin_json_path::KeyMatch;
use serde::{Deserialize, Serialize};

/// Options for a [`Basin`](crate::Basin).
///
/// Every field has a default, so a partial document deserializes:
///
/// ```
/// use object_basin::{BasinOptions, KeyMatch};
///
/// let options: BasinOptions = serde_json::from_str(r#"{"key_match": "ignore_ascii_case"}"#).unwrap();
/// assert_eq!(options.key_match, KeyMatch::IgnoreAsciiCase);
/// assert!(options.create_missing);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasinOptions {
    /// How path names are matched against stored keys when a path is
    /// evaluated. Pointer-addressed patches always match exactly.
    pub key_match: KeyMatch,
    /// Create missing intermediate objects and arrays when a whole-value
    /// write cannot be applied as a patch.
    pub create_missing: bool,
}

impl Default for BasinOptions {
    fn default() -> Self {
        Self {
            key_match: KeyMatch::Exact,
            create_missing: true,
        }
    }
}

impl BasinOptions {
    pub fn with_key_match(mut self, key_match: KeyMatch) -> Self {
        self.key_match = key_match;
        self
    }

    pub fn with_create_missing(mut self, create_missing: bool) -> Self {
        self.create_missing = create_missing;
        self
    }
}
