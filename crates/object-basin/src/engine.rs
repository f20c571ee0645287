//! Turns a cursor write into patch operations.
//!
//! Whole-value writes try `replace`, then `add`, then rebind the node found
//! by evaluating the path. Positional writes evaluate the path first and
//! splice the matched string or array.

use object_basin_json_path::{JsonPathEval, KeyMatch, NodeKind, PathComponent};
use object_basin_json_pointer::{format_json_pointer, get_mut, END_OF_ARRAY};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::cursor::EditMode;
use crate::error::{BasinError, Result};
use crate::json_patch::{apply_op, apply_ops, Op, PatchError};
use crate::options::BasinOptions;
use crate::registry::Entry;

/// Runs `f` on the document viewed as a single object value.
///
/// Root-level operations are rejected before reaching here, so the value
/// is still an object afterwards.
pub(crate) fn on_document<R>(items: &mut Map<String, Value>, f: impl FnOnce(&mut Value) -> R) -> R {
    let mut doc = Value::Object(std::mem::take(items));
    let out = f(&mut doc);
    if let Value::Object(map) = doc {
        *items = map;
    }
    out
}

/// Apply one write through `entry`, advancing its position when needed.
///
/// Returns the stored top-level key that owns the edited location. It can
/// differ from the cursor's key when names are matched ignoring case.
pub(crate) fn write(
    items: &mut Map<String, Value>,
    entry: &mut Entry,
    options: &BasinOptions,
    value: Value,
) -> Result<String> {
    trace!(pointer = %entry.pointer, mode = ?entry.mode, "write");
    match entry.mode {
        EditMode::Set => on_document(items, |doc| set_value(doc, entry, options, value)),
        EditMode::Append => {
            let (owner, _) =
                on_document(items, |doc| edit_in_place(doc, entry, options, value, None, None))?;
            Ok(owner)
        }
        EditMode::At {
            position,
            delete_count,
        } => {
            let (owner, advance) = on_document(items, |doc| {
                edit_in_place(doc, entry, options, value, Some(position), delete_count)
            })?;
            if let Some(by) = advance {
                entry.advance(by);
            }
            Ok(owner)
        }
    }
}

fn set_value(doc: &mut Value, entry: &Entry, options: &BasinOptions, value: Value) -> Result<String> {
    // Patches address stored keys, so a differently cased name never adds a
    // sibling next to an existing key.
    let steps = match options.key_match {
        KeyMatch::Exact => entry.steps.clone(),
        keys => JsonPathEval::resolve_steps(&entry.path, doc, keys),
    };
    let owner = steps.first().cloned().unwrap_or_else(|| entry.key.clone());

    // Replace first: `add` on an existing array index would insert.
    let replace = Op::Replace {
        path: steps.clone(),
        value: value.clone(),
    };
    match apply_op(doc, &replace) {
        Ok(_) => return Ok(owner),
        Err(err) if err.is_structural() => {
            debug!(pointer = %entry.pointer, %err, "replace missed, trying add");
        }
        Err(err) => return Err(err.into()),
    }

    let add = Op::Add {
        path: steps,
        value: value.clone(),
    };
    match apply_op(doc, &add) {
        Ok(_) => return Ok(owner),
        Err(err) if err.is_structural() => {
            debug!(pointer = %entry.pointer, %err, "add missed, evaluating path");
        }
        Err(err) => return Err(err.into()),
    }

    JsonPathEval::set(
        &entry.path,
        doc,
        value,
        options.key_match,
        options.create_missing,
    )
    .map(|components| {
        components
            .first()
            .map(PathComponent::to_step)
            .unwrap_or_else(|| entry.key.clone())
    })
    .map_err(|err| {
        debug!(pointer = %entry.pointer, %err, "path evaluation could not bind value");
        BasinError::LocationNotFound {
            pointer: entry.pointer.clone(),
        }
    })
}

/// Splice into the first node matched by the path.
///
/// `position` of `None` appends. Returns the owning key as stored and how
/// far an insert moved the cursor.
fn edit_in_place(
    doc: &mut Value,
    entry: &Entry,
    options: &BasinOptions,
    value: Value,
    position: Option<usize>,
    delete_count: Option<usize>,
) -> Result<(String, Option<usize>)> {
    let found = JsonPathEval::find(&entry.path, doc, options.key_match).ok_or_else(|| {
        BasinError::LocationNotFound {
            pointer: entry.pointer.clone(),
        }
    })?;
    let steps = found.steps();
    let owner = steps.first().cloned().unwrap_or_else(|| entry.key.clone());

    match found.value {
        Value::String(current) => {
            let (spliced, advance) = splice_str(current, &value, position, delete_count)?;
            replace_str(doc, steps, spliced)?;
            Ok((owner, advance))
        }
        Value::Array(_) => {
            splice_array(doc, steps, value, position, delete_count)?;
            Ok((owner, None))
        }
        other => Err(BasinError::UnsupportedNodeKind {
            kind: NodeKind::of(other),
            pointer: format_json_pointer(&steps),
        }),
    }
}

/// `current[..position] + value + current[position + delete_count..]`,
/// counted in chars and clamped to the string.
fn splice_str(
    current: &str,
    value: &Value,
    position: Option<usize>,
    delete_count: Option<usize>,
) -> Result<(String, Option<usize>)> {
    let insert = match value {
        Value::String(s) => s.as_str(),
        Value::Null => "",
        other => return Err(BasinError::InvalidValue(NodeKind::of(other))),
    };

    let Some(position) = position else {
        return Ok((format!("{current}{insert}"), None));
    };

    let len = current.chars().count();
    let start = position.min(len);
    let end = start.saturating_add(delete_count.unwrap_or(0)).min(len);

    let mut spliced = String::with_capacity(current.len() + insert.len());
    spliced.extend(current.chars().take(start));
    spliced.push_str(insert);
    spliced.extend(current.chars().skip(end));

    let advance = matches!(delete_count, None | Some(0)).then(|| insert.chars().count());
    Ok((spliced, advance))
}

fn replace_str(doc: &mut Value, steps: Vec<String>, spliced: String) -> Result<()> {
    let replace = Op::Replace {
        path: steps,
        value: Value::String(spliced),
    };
    match apply_op(doc, &replace) {
        Ok(_) => Ok(()),
        // `steps` come from a fresh match, so this rebind is a last resort.
        Err(err) if err.is_structural() => {
            let Op::Replace { path, value } = replace else {
                return Err(err.into());
            };
            debug!(pointer = %format_json_pointer(&path), %err, "replace missed, rebinding node");
            let slot = get_mut(doc, &path).ok_or_else(|| BasinError::LocationNotFound {
                pointer: format_json_pointer(&path),
            })?;
            *slot = value;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn splice_array(
    doc: &mut Value,
    steps: Vec<String>,
    value: Value,
    position: Option<usize>,
    delete_count: Option<usize>,
) -> Result<()> {
    let at = |segment: String| {
        let mut path = steps.clone();
        path.push(segment);
        path
    };

    let ops: Vec<Op> = match (position, delete_count) {
        // Each removal shifts the rest down into the same index.
        (Some(position), Some(count)) => {
            let path = at(position.to_string());
            (0..count).map(|_| Op::Remove { path: path.clone() }).collect()
        }
        (Some(position), None) => vec![Op::Add {
            path: at(position.to_string()),
            value,
        }],
        (None, _) => vec![Op::Add {
            path: at(END_OF_ARRAY.to_string()),
            value,
        }],
    };

    apply_ops(doc, &ops).map(|_| ()).map_err(|err: PatchError| {
        debug!(ops = ops.len(), %err, "array splice failed");
        BasinError::Patch(err)
    })
}
