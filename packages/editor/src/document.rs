//! # Document Handle
//!
//! A versioned, host-owned document value.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Apply → Apply → ... → Serialize
//!   ↓       ↓       ↓              ↓
//! JSON    v1      v2            JSON
//! ```
//!
//! Every [`Document::apply`] returns a new document; earlier versions stay
//! valid and unmodified.

use crate::mutations::{self, Patch};
use crate::EditorError;
use formthinker_common::{Path, Value};

/// Editable form document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Root of the value tree
    pub root: Value,

    /// Current version number (increments on each applied patch)
    pub version: u64,
}

impl Document {
    /// Wrap an existing value as version 0
    pub fn new(root: Value) -> Self {
        Self { root, version: 0 }
    }

    /// Parse a JSON document
    pub fn from_json(source: &str) -> Result<Self, EditorError> {
        let root: Value = serde_json::from_str(source)?;
        Ok(Self::new(root))
    }

    /// Apply a patch, producing the next version
    pub fn apply(&self, path: &Path, patch: &Patch) -> Self {
        Self {
            root: mutations::apply(&self.root, path, patch),
            version: self.version + 1,
        }
    }

    /// Apply a patch at a dotted path such as `slides.0.title`
    pub fn apply_at(&self, dotted: &str, patch: &Patch) -> Result<Self, EditorError> {
        let path: Path = dotted.parse()?;
        Ok(self.apply(&path, patch))
    }

    /// Read the value at `path`
    pub fn read(&self, path: &Path) -> Option<&Value> {
        mutations::read(&self.root, path)
    }

    pub fn to_json_pretty(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }
}
