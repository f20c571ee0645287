//! Incremental edits into a keyed JSON document through JSONPath cursors.
//!
//! A [`Basin`] holds a map of top-level items. Set a [`Cursor`] to say where
//! the next write lands and how (set the whole value, append, insert at an
//! offset, or delete a range), then call [`Basin::write`] repeatedly, for
//! example once per streamed chunk of text. Each write returns the
//! top-level item that owns the edited location.
//!
//! ```
//! use object_basin::{Basin, Cursor};
//! use serde_json::json;
//!
//! let mut basin: Basin = Basin::from_value(json!({"object": {"list": ["item 1"]}})).unwrap();
//!
//! basin.set_cursor(Cursor::new("object.list").append()).unwrap();
//! basin.write("item 2").unwrap();
//!
//! basin.set_cursor(Cursor::new("$['object'].list[1]").append()).unwrap();
//! let item = basin.write(" done").unwrap();
//! assert_eq!(item, json!({"list": ["item 1", "item 2 done"]}));
//! ```
//!
//! Labeled cursors keep several independent write positions on one basin:
//! see [`Basin::set_cursor_for`] and [`Basin::write_for`].

pub mod basin;
pub mod cursor;
mod engine;
pub mod error;
pub mod json_patch;
pub mod key;
pub mod options;
pub mod registry;
pub mod translate;

pub use basin::Basin;
pub use cursor::{Cursor, EditMode, APPEND};
pub use error::{BasinError, Result};
pub use key::top_level_key;
pub use options::BasinOptions;
pub use registry::CursorRegistry;
pub use translate::translate;

pub use object_basin_json_path::{KeyMatch, NodeKind};
