//! JSONPath-like expression types.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single step of a cursor expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Named selector for property access: `.name`, `['name']`, `[name]`
    Name(String),
    /// Index selector for array element access: `[0]`
    Index(usize),
}

impl Selector {
    /// The selector as an object key. An index addresses the numeric key.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Selector::Name(name) => Cow::Borrowed(name.as_str()),
            Selector::Index(index) => Cow::Owned(index.to_string()),
        }
    }
}

/// A parsed cursor expression: a chain of selectors starting at the root.
///
/// Unlike full RFC 9535 JSONPath there are no wildcards, slices, filters or
/// unions, so an expression addresses at most one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    pub selectors: Vec<Selector>,
}

impl JsonPath {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    /// The unescaped pointer steps this expression spells out literally.
    pub fn to_steps(&self) -> Vec<String> {
        self.selectors
            .iter()
            .map(|selector| selector.as_key().into_owned())
            .collect()
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::util::json_path_to_string(self))
    }
}

/// A resolved step of a match: the actual key or index in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent {
    Key(String),
    Index(usize),
}

impl PathComponent {
    /// The component as an unescaped pointer step.
    pub fn to_step(&self) -> String {
        match self {
            PathComponent::Key(key) => key.clone(),
            PathComponent::Index(index) => index.to_string(),
        }
    }
}

/// How a named selector is matched against object keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMatch {
    /// The key must be equal to the selector name.
    #[default]
    Exact,
    /// An exact key wins; otherwise the first key equal ignoring ASCII case.
    IgnoreAsciiCase,
}

impl KeyMatch {
    /// Resolve `name` to the key actually stored in `map`.
    pub fn resolve<'a>(&self, map: &'a serde_json::Map<String, Value>, name: &str) -> Option<&'a str> {
        if let Some((key, _)) = map.get_key_value(name) {
            return Some(key.as_str());
        }
        match self {
            KeyMatch::Exact => None,
            KeyMatch::IgnoreAsciiCase => map
                .keys()
                .find(|key| key.eq_ignore_ascii_case(name))
                .map(String::as_str),
        }
    }
}

/// The kind of a JSON node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl NodeKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => NodeKind::Null,
            Value::Bool(_) => NodeKind::Boolean,
            Value::Number(_) => NodeKind::Number,
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Array,
            Value::Object(_) => NodeKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Boolean => "boolean",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Array => "array",
            NodeKind::Object => "object",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
