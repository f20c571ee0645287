//! Cursor expression evaluator.

use crate::types::*;
use serde_json::{Map, Value};
use thiserror::Error;

/// Failure to rebind a value through [`JsonPathEval::set`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetError {
    #[error("NOT_FOUND")]
    NotFound,
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("cannot step into {0}")]
    NotAContainer(NodeKind),
}

/// The first node matched by an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    /// Normalized path to the matched node, with keys as stored.
    pub components: Vec<PathComponent>,
    /// The matched node.
    pub value: &'a Value,
}

impl Match<'_> {
    /// Unescaped pointer steps of the match.
    pub fn steps(&self) -> Vec<String> {
        self.components.iter().map(PathComponent::to_step).collect()
    }
}

/// Cursor expression evaluator.
pub struct JsonPathEval;

impl JsonPathEval {
    /// Find the node addressed by `path`, if it exists.
    pub fn find<'a>(path: &JsonPath, doc: &'a Value, keys: KeyMatch) -> Option<Match<'a>> {
        let mut current = doc;
        let mut components = Vec::with_capacity(path.selectors.len());

        for selector in &path.selectors {
            match (selector, current) {
                (Selector::Index(index), Value::Array(arr)) => {
                    current = arr.get(*index)?;
                    components.push(PathComponent::Index(*index));
                }
                (selector, Value::Object(map)) => {
                    let key = keys.resolve(map, &selector.as_key())?;
                    components.push(PathComponent::Key(key.to_string()));
                    current = map.get(key)?;
                }
                _ => return None,
            }
        }

        Some(Match {
            components,
            value: current,
        })
    }

    /// Pointer steps for `path` with each existing name replaced by the key
    /// as stored. Steps from the first missing node on are kept literally.
    pub fn resolve_steps(path: &JsonPath, doc: &Value, keys: KeyMatch) -> Vec<String> {
        let mut current = Some(doc);
        let mut steps = Vec::with_capacity(path.selectors.len());

        for selector in &path.selectors {
            let step = match (selector, current) {
                (Selector::Index(index), Some(Value::Array(arr))) => {
                    current = arr.get(*index);
                    index.to_string()
                }
                (selector, Some(Value::Object(map))) => {
                    let name = selector.as_key();
                    match keys.resolve(map, &name) {
                        Some(key) => {
                            current = map.get(key);
                            key.to_string()
                        }
                        None => {
                            current = None;
                            name.into_owned()
                        }
                    }
                }
                (selector, _) => {
                    current = None;
                    selector.as_key().into_owned()
                }
            };
            steps.push(step);
        }
        steps
    }

    /// Bind `value` at the node addressed by `path`, replacing what is there.
    ///
    /// A missing final object key is inserted and an array index equal to
    /// the length appends. With `create_missing`, absent intermediate steps
    /// are created as well: an object for a name step, an array for an
    /// index step. Returns the resolved components of the bound node.
    pub fn set(
        path: &JsonPath,
        doc: &mut Value,
        value: Value,
        keys: KeyMatch,
        create_missing: bool,
    ) -> Result<Vec<PathComponent>, SetError> {
        let Some((last, parents)) = path.selectors.split_last() else {
            *doc = value;
            return Ok(Vec::new());
        };

        let mut current = doc;
        let mut components = Vec::with_capacity(path.selectors.len());

        for (i, selector) in parents.iter().enumerate() {
            let next = if create_missing {
                Some(&path.selectors[i + 1])
            } else {
                None
            };
            let (child, component) = Self::child_mut(current, selector, keys, next)?;
            components.push(component);
            current = child;
        }

        components.push(Self::bind(current, last, keys, value)?);
        Ok(components)
    }

    fn child_mut<'a>(
        node: &'a mut Value,
        selector: &Selector,
        keys: KeyMatch,
        vivify: Option<&Selector>,
    ) -> Result<(&'a mut Value, PathComponent), SetError> {
        match (selector, node) {
            (Selector::Index(index), Value::Array(arr)) => {
                let len = arr.len();
                if *index == len {
                    let next = vivify.ok_or(SetError::NotFound)?;
                    arr.push(empty_container(next));
                } else if *index > len {
                    return Err(SetError::IndexOutOfRange { index: *index, len });
                }
                Ok((&mut arr[*index], PathComponent::Index(*index)))
            }
            (selector, Value::Object(map)) => {
                let name = selector.as_key();
                let key = match keys.resolve(map, &name) {
                    Some(key) => key.to_string(),
                    None => {
                        let next = vivify.ok_or(SetError::NotFound)?;
                        let name = name.into_owned();
                        map.insert(name.clone(), empty_container(next));
                        name
                    }
                };
                let child = map.get_mut(&key).ok_or(SetError::NotFound)?;
                Ok((child, PathComponent::Key(key)))
            }
            (_, other) => Err(SetError::NotAContainer(NodeKind::of(other))),
        }
    }

    fn bind(
        node: &mut Value,
        selector: &Selector,
        keys: KeyMatch,
        value: Value,
    ) -> Result<PathComponent, SetError> {
        match (selector, node) {
            (Selector::Index(index), Value::Array(arr)) => {
                let len = arr.len();
                if *index < len {
                    arr[*index] = value;
                } else if *index == len {
                    arr.push(value);
                } else {
                    return Err(SetError::IndexOutOfRange { index: *index, len });
                }
                Ok(PathComponent::Index(*index))
            }
            (selector, Value::Object(map)) => {
                let key = resolve_owned(map, &selector.as_key(), keys);
                map.insert(key.clone(), value);
                Ok(PathComponent::Key(key))
            }
            (_, other) => Err(SetError::NotAContainer(NodeKind::of(other))),
        }
    }
}

fn resolve_owned(map: &Map<String, Value>, name: &str, keys: KeyMatch) -> String {
    keys.resolve(map, name).unwrap_or(name).to_string()
}

fn empty_container(next: &Selector) -> Value {
    match next {
        Selector::Name(_) => Value::Object(Map::new()),
        Selector::Index(_) => Value::Array(Vec::new()),
    }
}
