//! Cursors: where and how the next write lands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BasinError, Result};

/// Position value that appends to the end of a string or array.
pub const APPEND: i64 = -1;

/// Indicates where updates should be made in a [`Basin`](crate::Basin).
///
/// Serializes with the concise names `j`, `p` and `d`. Deserialization
/// also accepts `path`/`jsonPath`, `position` and `deleteCount`.
///
/// ```
/// use object_basin::Cursor;
///
/// let cursor: Cursor = serde_json::from_str(r#"{"jsonPath": "message", "p": -1}"#).unwrap();
/// assert_eq!(cursor, Cursor::new("message").append());
/// assert_eq!(serde_json::to_string(&cursor).unwrap(), r#"{"j":"message","p":-1}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// JSONPath-like expression of the value to update.
    #[serde(rename = "j", alias = "path", alias = "jsonPath")]
    pub path: String,

    /// `None` sets the whole value, `-1` appends, otherwise the offset to
    /// insert or splice at.
    #[serde(
        rename = "p",
        alias = "position",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<i64>,

    /// Number of characters or elements to remove starting at `position`.
    #[serde(
        rename = "d",
        alias = "deleteCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delete_count: Option<usize>,
}

impl Cursor {
    /// A cursor that sets the whole value at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            position: None,
            delete_count: None,
        }
    }

    /// Insert at `position`.
    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(i64::try_from(position).unwrap_or(i64::MAX));
        self
    }

    /// Append to the end.
    pub fn append(mut self) -> Self {
        self.position = Some(APPEND);
        self
    }

    /// Remove `count` characters or elements starting at the position.
    pub fn delete(mut self, count: usize) -> Self {
        self.delete_count = Some(count);
        self
    }

    /// Decode a cursor from JSON, in either the concise or the long form.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| BasinError::InvalidCursor(e.to_string()))
    }

    /// Checks the position fields and returns the edit they describe.
    pub fn mode(&self) -> Result<EditMode> {
        match (self.position, self.delete_count) {
            (None, None) => Ok(EditMode::Set),
            (None, Some(_)) => Err(BasinError::InvalidCursor(
                "deleteCount requires a position".into(),
            )),
            (Some(APPEND), None) => Ok(EditMode::Append),
            (Some(APPEND), Some(_)) => Err(BasinError::InvalidCursor(
                "deleteCount cannot be combined with appending".into(),
            )),
            (Some(p), delete_count) => {
                let position = usize::try_from(p).map_err(|_| {
                    BasinError::InvalidCursor(format!("position must be -1 or more, got {p}"))
                })?;
                Ok(EditMode::At {
                    position,
                    delete_count,
                })
            }
        }
    }
}

/// The validated edit a cursor describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Replace or create the whole value.
    Set,
    /// Append to the end of a string or array.
    Append,
    /// Insert at, or splice from, an offset.
    At {
        position: usize,
        delete_count: Option<usize>,
    },
}
