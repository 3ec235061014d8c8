//! # Path Mutations
//!
//! Applies one [`Patch`] to a document at a key path and returns the new
//! document. The input is never modified: containers along the edited path
//! are copied, everything else is shared with the input.
//!
//! ## Mutation Semantics
//!
//! ### Set
//! - Every intermediate that is missing, scalar, null or an array is replaced
//!   by a fresh empty object before descending (no error is raised)
//! - A non-object root is replaced the same way
//! - An empty path replaces the whole document
//!
//! ### Delete
//! - A missing or null intermediate makes the whole delete a no-op
//! - Removing from an array leaves a `null` hole; indexes never shift
//! - Ancestor objects left empty are removed bottom-up, stopping at the first
//!   non-empty ancestor or at the root
//! - Arrays are never pruned, even when every slot is a hole

use formthinker_common::{Map, Path, PathSegment, Value};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Single edit scoped to one path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "camelCase")]
pub enum Patch {
    Set(Value),
    Delete,
}

impl Patch {
    /// Map the widget `onChange(path, value, remove)` arguments to a patch
    pub fn from_change(value: Value, remove: bool) -> Self {
        if remove {
            Patch::Delete
        } else {
            Patch::Set(value)
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Patch::Delete)
    }

    /// Get a debug name for this patch
    pub fn name(&self) -> &'static str {
        match self {
            Patch::Set(_) => "set",
            Patch::Delete => "delete",
        }
    }
}

/// Resolve `path` against `doc`
pub fn read<'a>(doc: &'a Value, path: &Path) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(doc, |node, segment| node.get(segment))
}

/// Apply `patch` at `path`, returning the next document
pub fn apply(doc: &Value, path: &Path, patch: &Patch) -> Value {
    tracing::trace!(path = %path, op = patch.name(), "applying patch");

    match patch {
        Patch::Set(value) => apply_set(doc, path.segments(), value),
        Patch::Delete => apply_delete(doc, path.segments()),
    }
}

fn apply_set(doc: &Value, segments: &[PathSegment], value: &Value) -> Value {
    let Some((last, spine)) = segments.split_last() else {
        return value.clone();
    };

    let mut root = doc.clone();
    let mut current = &mut root;
    for segment in spine {
        let child = coerce_object(current)
            .entry(segment.as_key())
            .or_insert(Value::Null);
        if !child.is_object() {
            *child = Value::object();
        }
        current = child;
    }
    coerce_object(current).insert(last.as_key(), value.clone());

    root
}

fn apply_delete(doc: &Value, segments: &[PathSegment]) -> Value {
    let Some((last, spine)) = segments.split_last() else {
        return doc.clone();
    };

    let mut parent = doc;
    for segment in spine {
        match parent.get(segment) {
            Some(child) if !child.is_null() => parent = child,
            _ => return doc.clone(),
        }
    }

    // Nothing to remove and nothing to prune
    if parent.get(last).is_none() && !parent.is_empty_object() {
        return doc.clone();
    }

    let mut root = doc.clone();
    remove_and_prune(&mut root, spine, last);
    root
}

/// Remove `last` below `node`, then drop every object on the way back up
/// that was left empty. Returns whether `node` itself is now an empty object.
fn remove_and_prune(node: &mut Value, spine: &[PathSegment], last: &PathSegment) -> bool {
    match spine.split_first() {
        None => remove_child(node, last),
        Some((segment, rest)) => {
            let emptied = match child_mut(node, segment) {
                Some(child) => remove_and_prune(child, rest, last),
                None => false,
            };
            if emptied {
                remove_child(node, segment);
            }
        }
    }

    node.is_empty_object()
}

fn child_mut<'a>(node: &'a mut Value, segment: &PathSegment) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => Arc::make_mut(map).get_mut(segment.as_key().as_str()),
        Value::Array(items) => {
            let index = segment.as_index()?;
            Arc::make_mut(items).get_mut(index)
        }
        _ => None,
    }
}

fn remove_child(node: &mut Value, segment: &PathSegment) {
    match node {
        Value::Object(map) => {
            let key = segment.as_key();
            if map.contains_key(key.as_str()) {
                Arc::make_mut(map).shift_remove(key.as_str());
            }
        }
        Value::Array(items) => {
            if let Some(index) = segment.as_index().filter(|i| *i < items.len()) {
                Arc::make_mut(items)[index] = Value::Null;
            }
        }
        _ => {}
    }
}

fn coerce_object(node: &mut Value) -> &mut Map {
    if !node.is_object() {
        *node = Value::object();
    }
    match node {
        Value::Object(map) => Arc::make_mut(map),
        _ => unreachable!("node was just replaced with an object"),
    }
}
