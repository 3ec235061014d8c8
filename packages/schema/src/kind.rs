use formthinker_common::Value;
use serde::Serialize;

/// Widget chosen for one schema entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    Number,
    Range { min: f64, max: f64, step: f64 },
    Checkbox,
    /// Radio group over a string `enum`
    Options { choices: Vec<String> },
    Color,
    RichText,
    StringArray,
    /// Checkbox group for arrays whose `items` carry an `enum`
    MultiCheckbox { choices: Vec<String> },
    ObjectArray,
    Select { choices: Vec<String> },
    /// Recurse into `properties`
    Nested,
    Error { description: String },
    Unknown { type_name: String },
}

impl FieldKind {
    /// Pick the widget for a schema entry from its `type`, `format` and `items`
    pub fn resolve(schema: &Value) -> Self {
        let type_name = text(schema, "type");

        match type_name {
            "string" => match text(schema, "format") {
                "variants" => FieldKind::Options {
                    choices: choices(member(schema, "enum")),
                },
                "color" => FieldKind::Color,
                "richText" => FieldKind::RichText,
                "array" => FieldKind::StringArray,
                _ => FieldKind::Text,
            },
            "number" => match text(schema, "format") {
                "range" => FieldKind::Range {
                    min: number(schema, "minimum").unwrap_or(0.0),
                    max: number(schema, "maximum").unwrap_or(100.0),
                    step: number(schema, "multipleOf").unwrap_or(1.0),
                },
                _ => FieldKind::Number,
            },
            "boolean" => FieldKind::Checkbox,
            "array" => {
                let items = member(schema, "items");
                let item_type = items.map_or("", |items| text(items, "type"));
                let item_enum = items.and_then(|items| member(items, "enum"));

                if item_type == "string" {
                    FieldKind::StringArray
                } else if item_enum.is_some() {
                    FieldKind::MultiCheckbox {
                        choices: choices(item_enum),
                    }
                } else if item_type == "object" {
                    FieldKind::ObjectArray
                } else {
                    FieldKind::StringArray
                }
            }
            "object" => FieldKind::Nested,
            "select" => FieldKind::Select {
                choices: choices(member(schema, "enum")),
            },
            "error" => FieldKind::Error {
                description: text(schema, "description").to_string(),
            },
            other => FieldKind::Unknown {
                type_name: other.to_string(),
            },
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, FieldKind::Nested)
    }

    /// Short display name
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Range { .. } => "range",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Options { .. } => "options",
            FieldKind::Color => "color",
            FieldKind::RichText => "richText",
            FieldKind::StringArray => "stringArray",
            FieldKind::MultiCheckbox { .. } => "multiCheckbox",
            FieldKind::ObjectArray => "objectArray",
            FieldKind::Select { .. } => "select",
            FieldKind::Nested => "nested",
            FieldKind::Error { .. } => "error",
            FieldKind::Unknown { .. } => "unknown",
        }
    }
}

pub(crate) fn member<'a>(schema: &'a Value, key: &str) -> Option<&'a Value> {
    schema.as_object().and_then(|map| map.get(key))
}

fn text<'a>(schema: &'a Value, key: &str) -> &'a str {
    member(schema, key).and_then(Value::as_str).unwrap_or("")
}

fn number(schema: &Value, key: &str) -> Option<f64> {
    member(schema, key).and_then(Value::as_f64)
}

fn choices(values: Option<&Value>) -> Vec<String> {
    values
        .and_then(Value::as_array)
        .unwrap_or_default()
        .iter()
        .map(|choice| match choice {
            Value::String(s) => s.clone(),
            other => serde_json::Value::from(other).to_string(),
        })
        .collect()
}
