use crate::errors::SchemaError;
use crate::kind::{member, FieldKind};
use crate::visitor::{walk_field, Visitor};
use formthinker_common::{Path, Value};
use formthinker_editor::{read, DeviceField};
use serde::Serialize;

/// Parsed form description
#[derive(Debug, Clone)]
pub struct Schema {
    root: Value,
}

impl Schema {
    pub fn new(root: Value) -> Result<Self, SchemaError> {
        if member(&root, "properties").is_some_and(Value::is_object) {
            Ok(Self { root })
        } else {
            Err(SchemaError::MissingProperties)
        }
    }

    pub fn from_json(source: &str) -> Result<Self, SchemaError> {
        Self::new(serde_json::from_str(source)?)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Every leaf field in declaration order
    pub fn fields(&self) -> Vec<FieldSlot> {
        collect_fields(&self.root)
    }
}

/// One leaf widget bound to one document path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSlot {
    pub path: Path,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub viewport_support: bool,
}

impl FieldSlot {
    /// Current value of this field in `doc`
    pub fn read<'a>(&self, doc: &'a Value) -> Option<&'a Value> {
        read(doc, &self.path)
    }

    /// Per-device editing state, for fields that declare `viewPortSupport`
    pub fn device_field(&self, doc: &Value) -> Option<DeviceField> {
        self.viewport_support
            .then(|| DeviceField::from_stored(self.read(doc)))
    }
}

/// Collect every leaf under `schema.properties`, recursing through objects
pub fn collect_fields(schema: &Value) -> Vec<FieldSlot> {
    let mut collector = FieldCollector::default();
    collector.visit_schema(&Path::root(), schema);
    collector.fields
}

#[derive(Default)]
struct FieldCollector {
    fields: Vec<FieldSlot>,
}

impl Visitor for FieldCollector {
    fn visit_field(&mut self, path: &Path, schema: &Value, kind: &FieldKind) {
        if kind.is_nested() {
            walk_field(self, path, schema, kind);
            return;
        }

        if let FieldKind::Unknown { type_name } = kind {
            tracing::warn!(path = %path, type_name = %type_name, "unknown field type");
        }

        self.fields.push(FieldSlot {
            path: path.clone(),
            kind: kind.clone(),
            viewport_support: member(schema, "viewPortSupport")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        });
    }
}
