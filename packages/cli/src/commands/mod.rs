pub mod apply;
pub mod codec;
pub mod fields;
pub mod replay;

pub use apply::{apply, ApplyArgs};
pub use codec::{codec, CodecArgs};
pub use fields::{fields, FieldsArgs};
pub use replay::{replay, ReplayArgs};

use anyhow::{Context, Result};
use formthinker_common::Value;
use formthinker_editor::Document;
use std::path::Path;

/// Read a JSON document from disk
pub(crate) fn load_document(path: &Path) -> Result<Document> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    Document::from_json(&source).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Interpret a command-line value as JSON, falling back to a plain string
pub(crate) fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw))
}

/// Compact one-line rendering for terminal output
pub(crate) fn display_value(value: &Value) -> String {
    serde_json::Value::from(value).to_string()
}
