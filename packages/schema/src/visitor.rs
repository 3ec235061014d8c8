use crate::kind::{member, FieldKind};
use formthinker_common::{Path, Value};

/// Visitor pattern for traversing a form schema
///
/// The default methods walk every property, recursing into nested objects.
/// Override `visit_field` to act on each entry.
pub trait Visitor: Sized {
    /// Object node whose `properties` each become a field under `path`
    fn visit_schema(&mut self, path: &Path, schema: &Value) {
        walk_schema(self, path, schema);
    }

    fn visit_field(&mut self, path: &Path, schema: &Value, kind: &FieldKind) {
        walk_field(self, path, schema, kind);
    }
}

pub fn walk_schema<V: Visitor>(visitor: &mut V, path: &Path, schema: &Value) {
    let Some(properties) = member(schema, "properties").and_then(Value::as_object) else {
        return;
    };

    for (key, property) in properties.iter() {
        let kind = FieldKind::resolve(property);
        visitor.visit_field(&path.child(key.as_str()), property, &kind);
    }
}

pub fn walk_field<V: Visitor>(visitor: &mut V, path: &Path, schema: &Value, kind: &FieldKind) {
    if kind.is_nested() {
        visitor.visit_schema(path, schema);
    }
}
