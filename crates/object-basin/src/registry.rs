//! Labeled cursors and their precomputed pointers.

use indexmap::IndexMap;
use object_basin_json_path::{JsonPath, JsonPathParser};
use object_basin_json_pointer::format_json_pointer;

use crate::cursor::{Cursor, EditMode};
use crate::error::{BasinError, Result};
use crate::key::top_level_key;
use crate::translate::translate;

/// A cursor together with everything derived from its path.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub cursor: Cursor,
    pub mode: EditMode,
    pub path: JsonPath,
    /// Canonical pointer of the target.
    pub pointer: String,
    /// Unescaped pointer segments.
    pub steps: Vec<String>,
    /// Top-level key owning the target.
    pub key: String,
}

impl Entry {
    fn new(cursor: Cursor) -> Result<Self> {
        let mode = cursor.mode()?;
        let pointer = translate(&cursor.path)?;
        let path = JsonPathParser::parse(&cursor.path)?;
        let steps = path.to_steps();

        // The textual translation splits on every `.`, even inside quotes.
        let parsed = format_json_pointer(&steps);
        if parsed != pointer {
            return Err(BasinError::PathSyntax(format!(
                "ambiguous path {:?}: translates to {pointer:?} but parses as {path} ({parsed:?})",
                cursor.path
            )));
        }

        let key = top_level_key(&pointer)?;
        Ok(Self {
            cursor,
            mode,
            path,
            pointer,
            steps,
            key,
        })
    }

    /// Moves an insert position forward by `by`.
    pub fn advance(&mut self, by: usize) {
        if let EditMode::At { position, .. } = &mut self.mode {
            *position = position.saturating_add(by);
            self.cursor.position = Some(i64::try_from(*position).unwrap_or(i64::MAX));
        }
    }
}

/// The default cursor plus any number of labeled ones.
#[derive(Debug, Clone, Default)]
pub struct CursorRegistry {
    default: Option<Entry>,
    labeled: IndexMap<String, Entry>,
}

impl CursorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `cursor` and store it under `label`.
    ///
    /// The registry is left unchanged when validation fails.
    pub fn set(&mut self, label: Option<&str>, cursor: Cursor) -> Result<()> {
        let entry = Entry::new(cursor)?;
        match label {
            None => self.default = Some(entry),
            Some(label) => {
                self.labeled.insert(label.to_string(), entry);
            }
        }
        Ok(())
    }

    /// The cursor under `label`, including any position advanced by writes.
    pub fn cursor(&self, label: Option<&str>) -> Option<&Cursor> {
        self.entry(label).map(|entry| &entry.cursor)
    }

    /// Canonical pointer of the cursor under `label`.
    pub fn pointer(&self, label: Option<&str>) -> Option<&str> {
        self.entry(label).map(|entry| entry.pointer.as_str())
    }

    /// Labels in the order they were first set.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labeled.keys().map(String::as_str)
    }

    /// Remove the cursor under `label`, returning it.
    pub fn clear(&mut self, label: Option<&str>) -> Option<Cursor> {
        let entry = match label {
            None => self.default.take(),
            Some(label) => self.labeled.shift_remove(label),
        };
        entry.map(|entry| entry.cursor)
    }

    pub(crate) fn entry(&self, label: Option<&str>) -> Option<&Entry> {
        match label {
            None => self.default.as_ref(),
            Some(label) => self.labeled.get(label),
        }
    }

    pub(crate) fn entry_mut(&mut self, label: Option<&str>) -> Result<&mut Entry> {
        let entry = match label {
            None => self.default.as_mut(),
            Some(label) => self.labeled.get_mut(label),
        };
        entry.ok_or_else(|| BasinError::NoCursor {
            label: label.map(str::to_string),
        })
    }
}
