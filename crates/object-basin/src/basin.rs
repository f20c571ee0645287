//! The document container.

use std::marker::PhantomData;

use indexmap::IndexSet;
use object_basin_json_path::NodeKind;
use object_basin_json_pointer::format_json_pointer;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;

use crate::cursor::Cursor;
use crate::engine::{self, on_document};
use crate::error::{BasinError, Result};
use crate::json_patch::{apply_op, from_json_patch, Op, PatchError};
use crate::options::BasinOptions;
use crate::registry::CursorRegistry;

/// A container for objects that you can write to using a JSONPath cursor.
///
/// `T` is the type of the top-level values. Items are stored as JSON and
/// only the item a call touched is converted back to `T`.
///
/// ```
/// use object_basin::{Basin, Cursor};
///
/// let mut basin: Basin<String> = Basin::new();
/// basin.set_cursor(Cursor::new("message")).unwrap();
/// assert_eq!(basin.write("ello").unwrap(), "ello");
///
/// basin.set_cursor(Cursor::new("message").append()).unwrap();
/// assert_eq!(basin.write(" World").unwrap(), "ello World");
///
/// basin.set_cursor(Cursor::new("message").at(0)).unwrap();
/// assert_eq!(basin.write("H").unwrap(), "Hello World");
/// ```
#[derive(Debug, Clone)]
pub struct Basin<T = Value> {
    items: Map<String, Value>,
    cursors: CursorRegistry,
    options: BasinOptions,
    _item: PhantomData<fn() -> T>,
}

impl<T> Default for Basin<T> {
    fn default() -> Self {
        Self {
            items: Map::new(),
            cursors: CursorRegistry::new(),
            options: BasinOptions::default(),
            _item: PhantomData,
        }
    }
}

impl<T> Basin<T> {
    /// An empty basin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the options while building. Works after any constructor:
    /// `Basin::from_value(doc)?.with_options(options)`.
    pub fn with_options(mut self, options: BasinOptions) -> Self {
        self.options = options;
        self
    }

    /// Wrap an existing JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(items) => Ok(Self {
                items,
                ..Self::default()
            }),
            other => Err(BasinError::InvalidDocument(NodeKind::of(&other))),
        }
    }

    /// Set the default cursor while building.
    pub fn with_cursor(mut self, cursor: Cursor) -> Result<Self> {
        self.set_cursor(cursor)?;
        Ok(self)
    }

    pub fn options(&self) -> &BasinOptions {
        &self.options
    }

    /// All items as stored.
    pub fn items(&self) -> &Map<String, Value> {
        &self.items
    }

    pub fn into_items(self) -> Map<String, Value> {
        self.items
    }

    pub fn cursors(&self) -> &CursorRegistry {
        &self.cursors
    }

    /// Set the default cursor, replacing any previous one.
    pub fn set_cursor(&mut self, cursor: Cursor) -> Result<()> {
        self.cursors.set(None, cursor)
    }

    /// Set the cursor for `label`, replacing any previous one.
    pub fn set_cursor_for(&mut self, label: &str, cursor: Cursor) -> Result<()> {
        self.cursors.set(Some(label), cursor)
    }

    /// The default cursor as it is now.
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursors.cursor(None)
    }

    pub fn cursor_for(&self, label: &str) -> Option<&Cursor> {
        self.cursors.cursor(Some(label))
    }

    /// Remove the cursor for `label`, or the default one.
    pub fn clear_cursor(&mut self, label: Option<&str>) -> Option<Cursor> {
        self.cursors.clear(label)
    }
}

impl<T> Basin<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Build a basin from typed items.
    pub fn from_items<I, K>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        let items = items
            .into_iter()
            .map(|(key, item)| -> Result<(String, Value)> {
                Ok((key.into(), serde_json::to_value(item)?))
            })
            .collect::<Result<Map<_, _>>>()?;
        Ok(Self {
            items,
            ..Self::default()
        })
    }

    /// The item under `key`, if any.
    pub fn get(&self, key: &str) -> Result<Option<T>> {
        self.decode(key)
    }

    /// Remove and return the item under `key`.
    pub fn remove(&mut self, key: &str) -> Result<Option<T>> {
        self.items
            .shift_remove(key)
            .map(T::deserialize)
            .transpose()
            .map_err(Into::into)
    }

    /// Write through the default cursor.
    ///
    /// Returns the top-level item that owns the edited location.
    pub fn write(&mut self, value: impl Serialize) -> Result<T> {
        self.write_entry(None, value)
    }

    /// Write through the cursor set for `label`.
    pub fn write_for(&mut self, label: &str, value: impl Serialize) -> Result<T> {
        self.write_entry(Some(label), value)
    }

    fn write_entry(&mut self, label: Option<&str>, value: impl Serialize) -> Result<T> {
        let value = serde_json::to_value(value)?;
        let entry = self.cursors.entry_mut(label)?;
        let key = engine::write(&mut self.items, entry, &self.options, value)?;

        self.decode(&key)?
            .ok_or_else(|| BasinError::LocationNotFound {
                pointer: format_json_pointer(&[key.as_str()]),
            })
    }

    /// Apply one patch operation.
    ///
    /// Returns the top-level item the operation targets, or `None` when it
    /// no longer exists.
    pub fn apply_patch(&mut self, op: &Op) -> Result<Option<T>> {
        let key = owner_key(op)?.to_string();
        on_document(&mut self.items, |doc| apply_op(doc, op))?;
        self.decode(&key)
    }

    /// Apply operations in order.
    ///
    /// Returns one entry per distinct top-level key, in the order the keys
    /// first appear. Operations applied before a failure stay applied.
    pub fn apply_patches(&mut self, ops: &[Op]) -> Result<Vec<Option<T>>> {
        let mut keys = IndexSet::new();
        for op in ops {
            keys.insert(owner_key(op)?);
        }
        trace!(ops = ops.len(), keys = keys.len(), "apply patches");

        on_document(&mut self.items, |doc| {
            ops.iter().try_for_each(|op| apply_op(doc, op).map(|_| ()))
        })?;
        keys.iter().map(|key| self.decode(key)).collect()
    }

    /// Decode an RFC 6902 patch (an array or a single operation) and apply it.
    pub fn apply_json_patch(&mut self, patch: &Value) -> Result<Vec<Option<T>>> {
        let ops = from_json_patch(patch)?;
        self.apply_patches(&ops)
    }

    fn decode(&self, key: &str) -> Result<Option<T>> {
        self.items
            .get(key)
            .map(T::deserialize)
            .transpose()
            .map_err(Into::into)
    }
}

/// The top-level key an operation writes under.
fn owner_key(op: &Op) -> Result<&str> {
    if op.from_path().is_some_and(|from| from.is_empty()) {
        return Err(PatchError::InvalidTarget.into());
    }
    op.path()
        .first()
        .map(String::as_str)
        .ok_or(BasinError::Patch(PatchError::InvalidTarget))
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_basin_json_path::KeyMatch;
    use serde_json::json;

    #[test]
    fn test_from_value_requires_object() {
        assert!(Basin::<Value>::from_value(json!({"a": 1})).is_ok());
        assert!(matches!(
            Basin::<Value>::from_value(json!([1])),
            Err(BasinError::InvalidDocument(NodeKind::Array))
        ));
    }

    #[test]
    fn test_write_without_cursor() {
        let mut basin: Basin = Basin::new();
        assert!(matches!(
            basin.write("x"),
            Err(BasinError::NoCursor { label: None })
        ));
        assert!(matches!(
            basin.write_for("a", "x"),
            Err(BasinError::NoCursor { label: Some(_) })
        ));
    }

    #[test]
    fn test_root_operations_rejected() {
        let mut basin: Basin = Basin::from_value(json!({"a": 1})).unwrap();
        assert!(matches!(
            basin.apply_patch(&Op::replace("", json!([]))),
            Err(BasinError::Patch(PatchError::InvalidTarget))
        ));
        let copy_root = Op::Copy {
            path: vec!["b".into()],
            from: vec![],
        };
        assert!(basin.apply_patch(&copy_root).is_err());
        assert_eq!(basin.items()["a"], json!(1));
    }

    #[test]
    fn test_options_with_initial_items() {
        let options = BasinOptions::default().with_key_match(KeyMatch::IgnoreAsciiCase);
        let mut basin: Basin = Basin::from_value(json!({"Message": "hi"}))
            .unwrap()
            .with_options(options.clone())
            .with_cursor(Cursor::new("MESSAGE").append())
            .unwrap();
        assert_eq!(basin.options(), &options);
        assert_eq!(basin.write("!").unwrap(), "hi!");

        let typed: Basin<i64> = Basin::from_items([("n", 1)])
            .unwrap()
            .with_options(BasinOptions::default().with_create_missing(false));
        assert!(!typed.options().create_missing);
        assert_eq!(typed.get("n").unwrap(), Some(1));
    }

    #[test]
    fn test_get_and_remove() {
        let mut basin: Basin<i64> = Basin::from_items([("a", 1), ("b", 2)]).unwrap();
        assert_eq!(basin.get("a").unwrap(), Some(1));
        assert_eq!(basin.remove("a").unwrap(), Some(1));
        assert_eq!(basin.get("a").unwrap(), None);
        assert_eq!(basin.into_items().len(), 1);
    }

    #[test]
    fn test_decode_mismatch_is_serialization_error() {
        let mut basin: Basin<i64> = Basin::new().with_cursor(Cursor::new("k")).unwrap();
        assert!(matches!(basin.write("text"), Err(BasinError::Serialization(_))));
        assert_eq!(basin.items()["k"], json!("text"));
    }
}
