use object_basin::{top_level_key, translate, BasinError};
use proptest::prelude::*;

#[test]
fn top_level_forms_matrix() {
    for path in ["k", "$.k", "$['k']", "$[k]", "$k", ".k", "$.['k']", "$.[k]"] {
        assert_eq!(translate(path).unwrap(), "/k", "{path}");
    }
}

#[test]
fn nested_forms_matrix() {
    let cases = [
        ("k.b[0].t", "/k/b/0/t"),
        ("k.b.[0].t", "/k/b/0/t"),
        ("$['key'].b[0].t", "/key/b/0/t"),
        ("$[\"key\"].list[12]", "/key/list/12"),
        ("object.list[1]", "/object/list/1"),
        ("$.holder.list2", "/holder/list2"),
        ("$.[o/k]", "/o~1k"),
    ];
    for (path, expected) in cases {
        assert_eq!(translate(path).unwrap(), expected, "{path}");
    }
}

#[test]
fn top_level_key_matrix() {
    let cases = [
        ("/a/b/c", "a"),
        ("/weird~0~1~01key", "weird~/~1key"),
        ("/o~1k/0", "o/k"),
        ("/key", "key"),
    ];
    for (pointer, expected) in cases {
        assert_eq!(top_level_key(pointer).unwrap(), expected, "{pointer}");
    }
    assert!(top_level_key("").is_err());
}

#[test]
fn rootless_paths_are_rejected() {
    for path in ["", "$"] {
        assert!(matches!(translate(path), Err(BasinError::PathSyntax(_))), "{path:?}");
    }
}

proptest! {
    #[test]
    fn quoted_key_survives_translation(key in "[^\\[\\]'.]{1,16}") {
        let pointer = translate(&format!("$['{key}']")).unwrap();
        prop_assert_eq!(top_level_key(&pointer).unwrap(), key);
    }

    #[test]
    fn dotted_paths_have_one_segment_per_name(names in prop::collection::vec("[a-z][a-z0-9_]{0,8}", 1..5)) {
        let pointer = translate(&names.join(".")).unwrap();
        prop_assert_eq!(pointer, format!("/{}", names.join("/")));
    }
}
