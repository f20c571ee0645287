//! JSON Patch apply logic.

use object_basin_json_pointer::{get, get_mut, parse_index};
use serde_json::Value;

use super::types::{Op, PatchError};

// ── Path navigation ───────────────────────────────────────────────────────

/// Mutable navigation to the parent of `path` (must exist).
fn parent_mut<'a>(doc: &'a mut Value, path: &'a [String]) -> Result<(&'a mut Value, &'a str), PatchError> {
    let (key, parent_path) = path.split_last().ok_or(PatchError::InvalidTarget)?;
    let parent = get_mut(doc, parent_path).ok_or(PatchError::NotFound)?;
    Ok((parent, key.as_str()))
}

// ── Individual operation applicators ─────────────────────────────────────

fn apply_add(doc: &mut Value, path: &[String], value: Value) -> Result<Option<Value>, PatchError> {
    if path.is_empty() {
        return Ok(Some(std::mem::replace(doc, value)));
    }
    let (parent, key) = parent_mut(doc, path)?;
    match parent {
        Value::Object(map) => Ok(map.insert(key.to_string(), value)),
        Value::Array(arr) => {
            let idx = parse_index(key, arr.len()).map_err(|_| PatchError::InvalidIndex)?;
            if idx > arr.len() {
                return Err(PatchError::InvalidIndex);
            }
            arr.insert(idx, value);
            Ok(None)
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

fn apply_remove(doc: &mut Value, path: &[String]) -> Result<Option<Value>, PatchError> {
    if path.is_empty() {
        return Err(PatchError::InvalidTarget);
    }
    let (parent, key) = parent_mut(doc, path)?;
    match parent {
        Value::Object(map) => map.remove(key).ok_or(PatchError::NotFound).map(Some),
        Value::Array(arr) => {
            let idx = parse_index(key, arr.len()).map_err(|_| PatchError::InvalidIndex)?;
            if idx >= arr.len() {
                return Err(PatchError::NotFound);
            }
            Ok(Some(arr.remove(idx)))
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

fn apply_replace(doc: &mut Value, path: &[String], value: Value) -> Result<Option<Value>, PatchError> {
    if path.is_empty() {
        return Ok(Some(std::mem::replace(doc, value)));
    }
    let (parent, key) = parent_mut(doc, path)?;
    let slot = match parent {
        // The key must already exist; a missing key is not created.
        Value::Object(map) => map.get_mut(key).ok_or(PatchError::NotFound)?,
        Value::Array(arr) => {
            let idx = parse_index(key, arr.len()).map_err(|_| PatchError::InvalidIndex)?;
            arr.get_mut(idx).ok_or(PatchError::NotFound)?
        }
        _ => return Err(PatchError::InvalidTarget),
    };
    Ok(Some(std::mem::replace(slot, value)))
}

fn apply_copy(doc: &mut Value, path: &[String], from: &[String]) -> Result<Option<Value>, PatchError> {
    let src = get(doc, from).ok_or(PatchError::NotFound)?.clone();
    apply_add(doc, path, src)
}

fn apply_move(doc: &mut Value, path: &[String], from: &[String]) -> Result<Option<Value>, PatchError> {
    if path == from {
        return Ok(None);
    }
    // A value cannot be moved into one of its own children.
    if path.len() > from.len() && path[..from.len()] == from[..] {
        return Err(PatchError::InvalidTarget);
    }
    let value = apply_remove(doc, from)?.ok_or(PatchError::NotFound)?;
    apply_add(doc, path, value)
}

fn apply_test(doc: &Value, path: &[String], value: &Value, not: bool) -> Result<(), PatchError> {
    let actual = get(doc, path).ok_or(PatchError::NotFound)?;
    if (actual == value) == not {
        Err(PatchError::Test)
    } else {
        Ok(())
    }
}

// ── Main apply function ───────────────────────────────────────────────────

/// Apply a single operation to the document (in-place mutation).
///
/// Returns the value previously at the path, if the operation displaced one.
pub fn apply_op(doc: &mut Value, op: &Op) -> Result<Option<Value>, PatchError> {
    match op {
        Op::Add { path, value } => apply_add(doc, path, value.clone()),
        Op::Remove { path } => apply_remove(doc, path),
        Op::Replace { path, value } => apply_replace(doc, path, value.clone()),
        Op::Copy { path, from } => apply_copy(doc, path, from),
        Op::Move { path, from } => apply_move(doc, path, from),
        Op::Test { path, value, not } => {
            apply_test(doc, path, value, *not)?;
            Ok(None)
        }
    }
}

/// Apply a sequence of operations in order, stopping at the first failure.
///
/// Operations applied before a failure stay applied.
pub fn apply_ops(doc: &mut Value, ops: &[Op]) -> Result<Vec<Option<Value>>, PatchError> {
    ops.iter().map(|op| apply_op(doc, op)).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn add_to_object() {
        let mut doc = json!({"a": 1});
        apply_op(&mut doc, &Op::add("/b", json!(2))).unwrap();
        assert_eq!(doc, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn add_to_array_inserts_before() {
        let mut doc = json!({"list": [1, 2, 3]});
        apply_op(&mut doc, &Op::add("/list/1", json!(99))).unwrap();
        assert_eq!(doc, json!({"list": [1, 99, 2, 3]}));
    }

    #[test]
    fn add_append_array() {
        let mut doc = json!([1, 2]);
        apply_op(&mut doc, &Op::add("/-", json!(3))).unwrap();
        assert_eq!(doc, json!([1, 2, 3]));
    }

    #[test]
    fn add_past_end_is_invalid_index() {
        let mut doc = json!({"list": [1]});
        assert_eq!(apply_op(&mut doc, &Op::add("/list/3", json!(0))), Err(PatchError::InvalidIndex));
        assert_eq!(apply_op(&mut doc, &Op::add("/list/x", json!(0))), Err(PatchError::InvalidIndex));
    }

    #[test]
    fn add_missing_parent_is_not_found() {
        let mut doc = json!({});
        assert_eq!(apply_op(&mut doc, &Op::add("/a/b", json!(0))), Err(PatchError::NotFound));
    }

    #[test]
    fn add_into_scalar_is_invalid_target() {
        let mut doc = json!({"s": "x"});
        assert_eq!(apply_op(&mut doc, &Op::add("/s/0", json!(0))), Err(PatchError::InvalidTarget));
    }

    #[test]
    fn remove_from_object() {
        let mut doc = json!({"a": 1, "b": 2});
        let old = apply_op(&mut doc, &Op::remove("/a")).unwrap();
        assert_eq!(doc, json!({"b": 2}));
        assert_eq!(old, Some(json!(1)));
    }

    #[test]
    fn remove_from_array_shifts() {
        let mut doc = json!(["a", "b", "c"]);
        apply_op(&mut doc, &Op::remove("/0")).unwrap();
        assert_eq!(doc, json!(["b", "c"]));
        assert_eq!(apply_op(&mut doc, &Op::remove("/2")), Err(PatchError::NotFound));
    }

    #[test]
    fn replace_value() {
        let mut doc = json!({"a": 1});
        let old = apply_op(&mut doc, &Op::replace("/a", json!(99))).unwrap();
        assert_eq!(doc, json!({"a": 99}));
        assert_eq!(old, Some(json!(1)));
    }

    #[test]
    fn replace_missing_key_leaves_document_unchanged() {
        let mut doc = json!({"a": 1});
        assert_eq!(apply_op(&mut doc, &Op::replace("/b", json!(2))), Err(PatchError::NotFound));
        assert_eq!(doc, json!({"a": 1}));
    }

    #[test]
    fn replace_array_index_overwrites() {
        let mut doc = json!({"list": ["a", "b"]});
        apply_op(&mut doc, &Op::replace("/list/1", json!("c"))).unwrap();
        assert_eq!(doc, json!({"list": ["a", "c"]}));
        assert_eq!(apply_op(&mut doc, &Op::replace("/list/2", json!("d"))), Err(PatchError::NotFound));
    }

    #[test]
    fn copy_op() {
        let mut doc = json!({"a": {"x": 1}, "b": {}});
        apply_op(&mut doc, &Op::Copy { path: vec!["b".into(), "x".into()], from: vec!["a".into(), "x".into()] }).unwrap();
        assert_eq!(doc["b"]["x"], json!(1));
    }

    #[test]
    fn move_op() {
        let mut doc = json!({"a": 1, "b": 2});
        apply_op(&mut doc, &Op::Move { path: vec!["c".into()], from: vec!["a".into()] }).unwrap();
        assert_eq!(doc, json!({"b": 2, "c": 1}));
    }

    #[test]
    fn move_into_own_child_is_rejected() {
        let mut doc = json!({"a": {"b": {}}});
        let op = Op::Move { path: vec!["a".into(), "b".into()], from: vec!["a".into()] };
        assert_eq!(apply_op(&mut doc, &op), Err(PatchError::InvalidTarget));
    }

    #[test]
    fn test_pass_and_fail() {
        let mut doc = json!({"a": 42});
        apply_op(&mut doc, &Op::Test { path: vec!["a".into()], value: json!(42), not: false }).unwrap();
        let result = apply_op(&mut doc, &Op::Test { path: vec!["a".into()], value: json!(99), not: false });
        assert_eq!(result, Err(PatchError::Test));
        apply_op(&mut doc, &Op::Test { path: vec!["a".into()], value: json!(99), not: true }).unwrap();
    }

    #[test]
    fn apply_ops_sequence_keeps_earlier_ops_on_failure() {
        let mut doc = json!({"a": 1});
        let ops = vec![
            Op::add("/b", json!(2)),
            Op::replace("/a", json!(10)),
            Op::remove("/missing"),
        ];
        assert_eq!(apply_ops(&mut doc, &ops), Err(PatchError::NotFound));
        assert_eq!(doc, json!({"a": 10, "b": 2}));
    }
}
