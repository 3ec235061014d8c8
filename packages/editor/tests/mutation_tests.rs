//! Path mutation scenarios against whole documents

use formthinker_editor::{apply, read, Document, Patch, Path, Value};
use serde_json::json;

fn doc(value: serde_json::Value) -> Value {
    Value::from(value)
}

fn path(text: &str) -> Path {
    text.parse().unwrap()
}

#[test]
fn test_set_then_delete_prunes_to_empty_root() {
    let start = doc(json!({"theme": {"color": "red"}}));

    let blue = apply(&start, &path("theme.color"), &Patch::Set("blue".into()));
    assert_eq!(blue, doc(json!({"theme": {"color": "blue"}})));

    let cleared = apply(&blue, &path("theme.color"), &Patch::Delete);
    assert_eq!(cleared, doc(json!({})));

    // Earlier versions are untouched
    assert_eq!(start, doc(json!({"theme": {"color": "red"}})));
    assert_eq!(blue, doc(json!({"theme": {"color": "blue"}})));
}

#[test]
fn test_deep_delete_stops_at_first_non_empty_ancestor() {
    let start = doc(json!({
        "page": {
            "hero": {"title": {"text": "hi"}},
            "footer": {"visible": true}
        }
    }));

    let next = apply(&start, &path("page.hero.title.text"), &Patch::Delete);

    assert_eq!(next, doc(json!({"page": {"footer": {"visible": true}}})));
}

#[test]
fn test_delete_is_idempotent() {
    let start = doc(json!({"a": {"b": {"c": 1}}, "d": 2}));
    let p = path("a.b.c");

    let once = apply(&start, &p, &Patch::Delete);
    let twice = apply(&once, &p, &Patch::Delete);

    assert_eq!(once, twice);
    assert_eq!(once, doc(json!({"d": 2})));
}

#[test]
fn test_emptied_array_is_not_pruned() {
    let start = doc(json!({"gallery": {"images": ["a.png"]}}));

    let next = apply(&start, &path("gallery.images.0"), &Patch::Delete);

    assert_eq!(next, doc(json!({"gallery": {"images": [null]}})));
}

#[test]
fn test_set_overwrites_structure_in_the_way() {
    let start = doc(json!({"style": {"padding": [1, 2, 3, 4]}}));

    let next = apply(&start, &path("style.padding.top"), &Patch::Set(8i64.into()));

    assert_eq!(next, doc(json!({"style": {"padding": {"top": 8}}})));
}

#[test]
fn test_sibling_branches_survive_edits() {
    let start = doc(json!({
        "header": {"logo": "x.svg", "links": ["a", "b"]},
        "body": {"text": "hello"}
    }));

    let next = apply(&start, &path("body.text"), &Patch::Set("bye".into()));
    let next = apply(&next, &path("body.size"), &Patch::Set(14i64.into()));

    let header_before = read(&start, &path("header")).unwrap();
    let header_after = read(&next, &path("header")).unwrap();
    assert!(header_before.ptr_eq(header_after));
    assert_eq!(read(&next, &path("body.size")), Some(&Value::from(14i64)));
}

#[test]
fn test_read_through_arrays() {
    let start = doc(json!({"slides": [{"title": "one"}, {"title": "two"}]}));

    assert_eq!(
        read(&start, &path("slides.1.title")),
        Some(&Value::from("two"))
    );
    assert_eq!(read(&start, &path("slides.5.title")), None);
    assert_eq!(read(&start, &Path::root()), Some(&start));
}

#[test]
fn test_replay_is_deterministic() {
    let patches = vec![
        (path("a.b"), Patch::Set(1i64.into())),
        (path("a.c"), Patch::Set("x".into())),
        (path("a.b"), Patch::Delete),
        (path("z"), Patch::Set(true.into())),
        (path("a.c"), Patch::Delete),
    ];

    let run = || {
        patches
            .iter()
            .fold(Document::default(), |doc, (p, patch)| doc.apply(p, patch))
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
    assert_eq!(first.root, doc(json!({"z": true})));
    assert_eq!(first.version, 5);
}
