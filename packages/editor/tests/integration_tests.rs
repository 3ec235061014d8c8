//! Integration tests for editor crate

use formthinker_editor::{
    decode, encode, Decoded, Device, DeviceField, Document, EditSession, EditorConfig, Patch,
    Path, Value,
};
use serde_json::json;
use std::time::Duration;
use tokio::sync::watch;

#[test]
fn test_device_field_lifecycle() {
    let path: Path = "hero.padding".parse().unwrap();
    let mut doc = Document::new(Value::from(json!({"hero": {"padding": "8px"}})));

    // Uniform value: device support starts off
    let mut field = DeviceField::from_stored(doc.read(&path));
    assert!(!field.is_enabled());
    assert_eq!(field.current(), Value::from("8px"));

    // Turning support on discards the uniform value
    doc = doc.apply(&path, &field.enable());
    field.sync(doc.read(&path));
    assert_eq!(
        decode(doc.read(&path).unwrap().as_str().unwrap()),
        Decoded::Variants(Default::default())
    );

    // Edits target the active device and rewrite the whole composite
    field.select(Device::Tablet);
    doc = doc.apply(&path, &field.edit("16px".into()));
    field.select(Device::Desktop);
    doc = doc.apply(&path, &field.edit("24px".into()));

    assert_eq!(
        doc.read(&path),
        Some(&Value::from(encode(&["", "16px", "24px"])))
    );

    // A widget rendered later recovers the same state from the document
    let reloaded = DeviceField::from_stored(doc.read(&path));
    assert!(reloaded.is_enabled());
    assert_eq!(reloaded.segments(), &["".to_string(), "16px".into(), "24px".into()]);

    // Turning support off collapses back to one empty value
    doc = doc.apply(&path, &field.disable());
    assert_eq!(doc.read(&path), Some(&Value::from("")));
    assert_eq!(doc.version, 4);
}

#[tokio::test(start_paused = true)]
async fn test_edit_session_workflow() {
    let (sink, mut rendered) = watch::channel(Value::from(json!({"title": "Draft"})));
    let session = EditSession::spawn(&EditorConfig::default(), sink);

    let title = session.handle();
    let color = session.handle();

    title.on_change("title", "Published".into(), false).unwrap();
    color
        .on_change(Path::root().key("theme").key("color"), "#fff".into(), false)
        .unwrap();

    rendered.changed().await.unwrap();
    assert_eq!(
        *rendered.borrow_and_update(),
        Value::from(json!({"title": "Published", "theme": {"color": "#fff"}}))
    );

    // Reset the color field; its emptied parent object goes away too
    color
        .on_change(Path::root().key("theme").key("color"), Value::Null, true)
        .unwrap();
    rendered.changed().await.unwrap();
    assert_eq!(
        *rendered.borrow_and_update(),
        Value::from(json!({"title": "Published"}))
    );

    session.dispose();
    title.on_change("title", "ignored".into(), false).unwrap_err();
    let next = tokio::time::timeout(Duration::from_secs(5), rendered.changed()).await;
    assert!(next.is_err() || next.unwrap().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_versioned_document_sink() {
    let (sink, mut rendered) = watch::channel(Document::default());
    let session = EditSession::spawn(&EditorConfig::default(), sink);

    session.on_change("a", 1i64.into(), false).unwrap();
    session.on_change("b", 2i64.into(), false).unwrap();
    rendered.changed().await.unwrap();

    let doc = rendered.borrow().clone();
    assert_eq!(doc.version, 1);
    assert_eq!(doc.root, Value::from(json!({"a": 1, "b": 2})));
}

#[test]
fn test_patch_serialization() {
    let set = Patch::Set(Value::from(json!({"nested": [1, 2]})));
    let json = serde_json::to_string(&set).unwrap();
    assert_eq!(json, r#"{"op":"set","value":{"nested":[1,2]}}"#);

    let deserialized: Patch = serde_json::from_str(&json).unwrap();
    assert_eq!(set, deserialized);

    let delete: Patch = serde_json::from_str(r#"{"op":"delete"}"#).unwrap();
    assert_eq!(delete, Patch::Delete);
}
