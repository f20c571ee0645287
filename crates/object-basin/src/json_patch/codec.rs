//! JSON codec for JSON Patch operations.
//!
//! Converts operations to and from `serde_json::Value` in RFC 6902 format.

use object_basin_json_pointer::{format_json_pointer, parse_json_pointer, validate_json_pointer};
use serde_json::{json, Map, Value};

use super::types::{Op, Path, PatchError};

// ── Path helpers ──────────────────────────────────────────────────────────

fn encode_path(path: &[String]) -> Value {
    Value::String(format_json_pointer(path))
}

fn decode_path(v: &Value) -> Result<Path, PatchError> {
    let s = v
        .as_str()
        .ok_or_else(|| PatchError::InvalidOp("path must be a string".into()))?;
    validate_json_pointer(s).map_err(|e| PatchError::InvalidOp(format!("{e}: {s}")))?;
    Ok(parse_json_pointer(s))
}

fn required<'a>(obj: &'a Map<String, Value>, op: &str, field: &str) -> Result<&'a Value, PatchError> {
    obj.get(field)
        .ok_or_else(|| PatchError::InvalidOp(format!("{op} requires '{field}'")))
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize an `Op` to a `serde_json::Value` in the JSON Patch format.
pub fn to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value } => json!({
            "op": "add",
            "path": encode_path(path),
            "value": value
        }),
        Op::Remove { path } => json!({ "op": "remove", "path": encode_path(path) }),
        Op::Replace { path, value } => json!({
            "op": "replace",
            "path": encode_path(path),
            "value": value
        }),
        Op::Copy { path, from } => json!({
            "op": "copy",
            "path": encode_path(path),
            "from": encode_path(from)
        }),
        Op::Move { path, from } => json!({
            "op": "move",
            "path": encode_path(path),
            "from": encode_path(from)
        }),
        Op::Test { path, value, not } => {
            let mut m = Map::new();
            m.insert("op".into(), json!("test"));
            m.insert("path".into(), encode_path(path));
            m.insert("value".into(), value.clone());
            if *not {
                m.insert("not".into(), json!(true));
            }
            Value::Object(m)
        }
    }
}

// ── Deserialization ───────────────────────────────────────────────────────

/// Deserialize a `serde_json::Value` into an `Op`.
pub fn from_json(v: &Value) -> Result<Op, PatchError> {
    let obj = v
        .as_object()
        .ok_or_else(|| PatchError::InvalidOp("operation must be an object".into()))?;
    let op_str = obj
        .get("op")
        .and_then(|v| v.as_str())
        .ok_or_else(|| PatchError::InvalidOp("missing 'op' field".into()))?;

    let path = decode_path(required(obj, op_str, "path")?)?;

    match op_str {
        "add" => Ok(Op::Add {
            path,
            value: required(obj, op_str, "value")?.clone(),
        }),
        "remove" => Ok(Op::Remove { path }),
        "replace" => Ok(Op::Replace {
            path,
            value: required(obj, op_str, "value")?.clone(),
        }),
        "copy" => Ok(Op::Copy {
            path,
            from: decode_path(required(obj, op_str, "from")?)?,
        }),
        "move" => Ok(Op::Move {
            path,
            from: decode_path(required(obj, op_str, "from")?)?,
        }),
        "test" => Ok(Op::Test {
            path,
            value: required(obj, op_str, "value")?.clone(),
            not: obj.get("not").and_then(Value::as_bool).unwrap_or(false),
        }),
        other => Err(PatchError::InvalidOp(format!("unknown op: {other}"))),
    }
}

/// Serialize a list of operations to a JSON array.
pub fn to_json_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

/// Deserialize a JSON Patch: an array of operations or a single operation.
pub fn from_json_patch(v: &Value) -> Result<Vec<Op>, PatchError> {
    match v {
        Value::Array(arr) => arr.iter().map(from_json).collect(),
        Value::Object(_) => Ok(vec![from_json(v)?]),
        _ => Err(PatchError::InvalidOp("patch must be an array or an object".into())),
    }
}
