use criterion::{black_box, criterion_group, criterion_main, Criterion};
use formthinker_editor::{apply, Patch, Path, Value};
use serde_json::json;

/// Wide document: many sibling sections, each with a handful of fields
fn wide_document(sections: usize) -> Value {
    let mut root = serde_json::Map::new();
    for i in 0..sections {
        root.insert(
            format!("section{}", i),
            json!({
                "title": format!("Section {}", i),
                "style": {"color": "#000", "padding": "8px|-|D|-|16px|-|D|-|24px"},
                "items": ["a", "b", "c"]
            }),
        );
    }
    Value::from(serde_json::Value::Object(root))
}

fn set_leaf_in_wide_document(c: &mut Criterion) {
    let doc = wide_document(500);
    let path: Path = "section250.style.color".parse().unwrap();
    let patch = Patch::Set("#fff".into());

    c.bench_function("set_leaf_in_wide_document", |b| {
        b.iter(|| apply(black_box(&doc), black_box(&path), black_box(&patch)))
    });
}

fn delete_with_pruning(c: &mut Criterion) {
    let doc = Value::from(json!({"a": {"b": {"c": {"d": {"e": {"f": 1}}}}}, "keep": true}));
    let path: Path = "a.b.c.d.e.f".parse().unwrap();

    c.bench_function("delete_with_pruning", |b| {
        b.iter(|| apply(black_box(&doc), black_box(&path), &Patch::Delete))
    });
}

fn set_creating_deep_path(c: &mut Criterion) {
    let doc = Value::object();
    let path: Path = (0..16).map(|i| format!("level{}", i)).collect();
    let patch = Patch::Set(true.into());

    c.bench_function("set_creating_deep_path", |b| {
        b.iter(|| apply(black_box(&doc), black_box(&path), black_box(&patch)))
    });
}

criterion_group!(
    benches,
    set_leaf_in_wide_document,
    delete_with_pruning,
    set_creating_deep_path
);
criterion_main!(benches);
