//! JSON Patch (RFC 6902) primitive used by the basin.
//!
//! All six RFC 6902 operations are supported:
//! `add`, `remove`, `replace`, `copy`, `move`, `test`.
//!
//! A missing target is reported as [`PatchError::NotFound`] so callers can
//! tell "the location does not exist yet" apart from other failures.

pub mod types;
pub mod apply;
pub mod codec;

pub use types::{Op, PatchError};
pub use apply::{apply_op, apply_ops};
pub use codec::{from_json, from_json_patch, to_json, to_json_patch};
