//! Core types for the JSON Patch module.

use serde_json::Value;
use thiserror::Error;

pub use object_basin_json_pointer::Path;
use object_basin_json_pointer::parse_json_pointer;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("NOT_FOUND")]
    NotFound,
    #[error("TEST")]
    Test,
    #[error("INVALID_INDEX")]
    InvalidIndex,
    #[error("INVALID_TARGET")]
    InvalidTarget,
    #[error("INVALID_OP: {0}")]
    InvalidOp(String),
}

impl PatchError {
    /// True when the failure means the addressed location does not exist
    /// in the shape the operation needs.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            PatchError::NotFound | PatchError::InvalidIndex | PatchError::InvalidTarget
        )
    }
}

// ── Op enum ───────────────────────────────────────────────────────────────

/// A JSON Patch operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add { path: Path, value: Value },
    Remove { path: Path },
    Replace { path: Path, value: Value },
    Copy { path: Path, from: Path },
    Move { path: Path, from: Path },
    Test { path: Path, value: Value, not: bool },
}

impl Op {
    /// `add` at a JSON Pointer string.
    pub fn add(pointer: &str, value: Value) -> Self {
        Op::Add {
            path: parse_json_pointer(pointer),
            value,
        }
    }

    /// `remove` at a JSON Pointer string.
    pub fn remove(pointer: &str) -> Self {
        Op::Remove {
            path: parse_json_pointer(pointer),
        }
    }

    /// `replace` at a JSON Pointer string.
    pub fn replace(pointer: &str, value: Value) -> Self {
        Op::Replace {
            path: parse_json_pointer(pointer),
            value,
        }
    }

    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
            Op::Copy { .. } => "copy",
            Op::Move { .. } => "move",
            Op::Test { .. } => "test",
        }
    }

    /// Returns the target path of the operation.
    pub fn path(&self) -> &Path {
        match self {
            Op::Add { path, .. }
            | Op::Remove { path }
            | Op::Replace { path, .. }
            | Op::Copy { path, .. }
            | Op::Move { path, .. }
            | Op::Test { path, .. } => path,
        }
    }

    /// Returns the source path of `copy` and `move`.
    pub fn from_path(&self) -> Option<&Path> {
        match self {
            Op::Copy { from, .. } | Op::Move { from, .. } => Some(from),
            _ => None,
        }
    }
}
