//! JSONPath-like cursor expressions.
//!
//! A cursor expression is the dotted/bracketed subset of JSONPath that
//! addresses exactly one location: object keys and non-negative array
//! indices, with or without the leading `$`. Wildcards, slices, unions,
//! filters and recursive descent are rejected at parse time.
//!
//! # Example
//!
//! ```
//! use object_basin_json_path::{JsonPathEval, JsonPathParser, KeyMatch};
//! use serde_json::json;
//!
//! let path = JsonPathParser::parse("$['key'].b[0].t").unwrap();
//! let doc = json!({"key": {"b": [{"t": "h"}]}});
//!
//! let found = JsonPathEval::find(&path, &doc, KeyMatch::Exact).unwrap();
//! assert_eq!(found.value, &json!("h"));
//! assert_eq!(found.steps(), vec!["key", "b", "0", "t"]);
//! ```

mod types;
pub use types::*;

mod parser;
pub use parser::{JsonPathParser, ParseError};

mod eval;
pub use eval::{JsonPathEval, Match, SetError};

mod util;
pub use util::json_path_to_string;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_then_find() {
        let path = JsonPathParser::parse("object.list[1]").unwrap();
        let doc = json!({"object": {"list": ["item 1", "item 2"]}});
        let found = JsonPathEval::find(&path, &doc, KeyMatch::Exact).unwrap();
        assert_eq!(found.value, &json!("item 2"));
        assert_eq!(NodeKind::of(found.value), NodeKind::String);
    }

    #[test]
    fn test_parse_then_set() {
        let path = JsonPathParser::parse("$.message").unwrap();
        let mut doc = json!({});
        JsonPathEval::set(&path, &mut doc, json!("ello"), KeyMatch::Exact, true).unwrap();
        assert_eq!(doc, json!({"message": "ello"}));
    }

    #[test]
    fn test_display() {
        let path = JsonPathParser::parse("$['key'].b[0]").unwrap();
        assert_eq!(path.to_string(), "$.key.b[0]");
    }
}
