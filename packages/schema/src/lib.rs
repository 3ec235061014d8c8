//! # FormThinker Schema
//!
//! Maps a JSON-schema-like description onto widget kinds and document paths.
//!
//! Each entry under `properties` becomes one field. `object` entries recurse
//! with the property key appended to the path, everything else is a leaf
//! bound to exactly one path in the document.

mod errors;
mod kind;
mod slot;
mod visitor;

pub use errors::SchemaError;
pub use kind::FieldKind;
pub use slot::{collect_fields, FieldSlot, Schema};
pub use visitor::{walk_field, walk_schema, Visitor};
