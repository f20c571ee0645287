//! Cursor expression utility helpers.

use crate::types::{JsonPath, Selector};

/// Convert a parsed expression back to its normalized string form.
///
/// Identifier-like names use dot notation, everything else is quoted.
pub fn json_path_to_string(path: &JsonPath) -> String {
    let mut out = String::from("$");
    for selector in &path.selectors {
        match selector {
            Selector::Name(name) if is_identifier(name) => {
                out.push('.');
                out.push_str(name);
            }
            Selector::Name(name) => {
                out.push_str("['");
                out.push_str(&escape_single_quoted(name));
                out.push_str("']");
            }
            Selector::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    out
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

fn escape_single_quoted(name: &str) -> String {
    name.replace('\\', "\\\\").replace('\'', "\\'")
}
