//! Property tests over generated documents and paths

use formthinker_editor::{apply, read, Patch, Path, PathSegment, Value};
use proptest::prelude::*;

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ];

    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::vec(("[a-d]", inner), 0..4)
                .prop_map(|entries| Value::from(entries.into_iter().collect::<formthinker_common::Map>())),
        ]
    })
}

fn arb_path() -> impl Strategy<Value = Path> {
    prop::collection::vec(
        prop_oneof![
            "[a-d]".prop_map(PathSegment::Key),
            (0usize..3).prop_map(PathSegment::Index),
        ],
        1..5,
    )
    .prop_map(Path::new)
}

/// Every object below the root has at least one key
fn no_empty_objects_below_root(value: &Value) -> bool {
    fn check(value: &Value) -> bool {
        match value {
            Value::Object(map) => !map.is_empty() && map.values().all(check),
            Value::Array(items) => items.iter().all(check),
            _ => true,
        }
    }

    match value {
        Value::Object(map) => map.values().all(check),
        Value::Array(items) => items.iter().all(check),
        _ => true,
    }
}

proptest! {
    #[test]
    fn set_then_read_returns_value(doc in arb_value(), path in arb_path(), value in arb_value()) {
        let next = apply(&doc, &path, &Patch::Set(value.clone()));
        let read_back = read(&next, &path);
        prop_assert_eq!(read_back, Some(&value));
    }

    #[test]
    fn delete_twice_equals_delete_once(doc in arb_value(), path in arb_path()) {
        let once = apply(&doc, &path, &Patch::Delete);
        let twice = apply(&once, &path, &Patch::Delete);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn apply_never_mutates_input(doc in arb_value(), path in arb_path(), value in arb_value()) {
        let snapshot = serde_json::to_string(&doc).unwrap();
        let _ = apply(&doc, &path, &Patch::Set(value));
        let _ = apply(&doc, &path, &Patch::Delete);
        prop_assert_eq!(serde_json::to_string(&doc).unwrap(), snapshot);
    }

    #[test]
    fn set_then_delete_leaves_no_empty_objects(path in arb_path(), value in arb_value()) {
        let start = Value::object();
        let set = apply(&start, &path, &Patch::Set(value));
        let cleared = apply(&set, &path, &Patch::Delete);
        prop_assert_eq!(read(&cleared, &path), None);
        prop_assert!(no_empty_objects_below_root(&cleared));
    }
}
