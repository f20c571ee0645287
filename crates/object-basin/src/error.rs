//! Error types for basin operations.

use object_basin_json_path::{NodeKind, ParseError};
use object_basin_json_pointer::JsonPointerError;
use thiserror::Error;

use crate::json_patch::PatchError;

/// Errors that can occur while setting cursors, writing, or patching.
#[derive(Error, Debug)]
pub enum BasinError {
    /// The cursor path cannot be parsed or translated to a pointer.
    #[error("invalid path syntax: {0}")]
    PathSyntax(String),

    /// Nothing exists at the target and it could not be created.
    #[error("location not found: {pointer:?}")]
    LocationNotFound { pointer: String },

    /// A positional edit hit a node that is neither a string nor an array.
    #[error("cannot edit a {kind} by position at {pointer:?}")]
    UnsupportedNodeKind { kind: NodeKind, pointer: String },

    /// The cursor fields are inconsistent.
    #[error("invalid cursor: {0}")]
    InvalidCursor(String),

    /// No cursor is set for the label used by a write.
    #[error("no cursor set{}", .label.as_ref().map(|l| format!(" for label {l:?}")).unwrap_or_default())]
    NoCursor { label: Option<String> },

    /// A string splice was given something other than a string.
    #[error("a string edit needs a string value, got {0}")]
    InvalidValue(NodeKind),

    /// The document root must be a JSON object.
    #[error("document must be an object, got {0}")]
    InvalidDocument(NodeKind),

    /// The patch primitive failed in a way that is not recovered.
    #[error("patch failed: {0}")]
    Patch(#[from] PatchError),

    /// A typed item could not be converted to or from JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ParseError> for BasinError {
    fn from(err: ParseError) -> Self {
        BasinError::PathSyntax(err.to_string())
    }
}

impl From<JsonPointerError> for BasinError {
    fn from(err: JsonPointerError) -> Self {
        BasinError::PathSyntax(err.to_string())
    }
}

/// Result alias for basin operations.
pub type Result<T> = std::result::Result<T, BasinError>;
