//! JSONPath to JSON Pointer translation.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{BasinError, Result};

fn open_bracket() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"/?\[['"]?"#).unwrap())
}

fn close_bracket() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"['"]?\]"#).unwrap())
}

/// Translate a JSONPath-like expression into a canonical JSON Pointer.
///
/// The translation is textual: `~` and `/` are escaped, `.` separates
/// segments, and bracket/quote decorations are stripped. Key names must
/// not contain `[` or `]`.
///
/// ```
/// use object_basin::translate;
///
/// assert_eq!(translate("key.b[0].t").unwrap(), "/key/b/0/t");
/// assert_eq!(translate("$['key']").unwrap(), "/key");
/// assert_eq!(translate("$.[o/k]").unwrap(), "/o~1k");
/// ```
pub fn translate(path: &str) -> Result<String> {
    if path.is_empty() || path == "$" {
        return Err(BasinError::PathSyntax(format!("path {path:?} addresses no key")));
    }

    // `~` first, otherwise the `~` of `~1` would be escaped again.
    let escaped = path.replace('~', "~0").replace('/', "~1").replace('.', "/");
    let body = escaped.strip_prefix('$').unwrap_or(&escaped);
    let rooted = if body.starts_with('/') {
        body.to_string()
    } else {
        format!("/{body}")
    };

    let opened = open_bracket().replace_all(&rooted, "/");
    Ok(close_bracket().replace_all(&opened, "").into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_forms() {
        for path in ["k", "$.k", "$['k']", "$[k]", "$k", ".k", "$.['k']", "$.[k]", "$[\"k\"]"] {
            assert_eq!(translate(path).unwrap(), "/k", "{path}");
        }
    }

    #[test]
    fn test_nested_forms() {
        assert_eq!(translate("k.b[0].t").unwrap(), "/k/b/0/t");
        assert_eq!(translate("k.b.[0].t").unwrap(), "/k/b/0/t");
        assert_eq!(translate("$['k'].b[0]['t']").unwrap(), "/k/b/0/t");
        assert_eq!(translate("list[1]").unwrap(), "/list/1");
    }

    #[test]
    fn test_escapes_reserved_characters() {
        assert_eq!(translate("$.['o/k']").unwrap(), "/o~1k");
        assert_eq!(translate("$['a~b']").unwrap(), "/a~0b");
        assert_eq!(translate("$['weird~/~1key']").unwrap(), "/weird~0~1~01key");
    }

    #[test]
    fn test_empty_and_root_rejected() {
        assert!(matches!(translate(""), Err(BasinError::PathSyntax(_))));
        assert!(matches!(translate("$"), Err(BasinError::PathSyntax(_))));
    }

    #[test]
    fn test_dot_inside_quotes_is_split() {
        assert_eq!(translate("$['a.b']").unwrap(), "/a/b");
    }
}
