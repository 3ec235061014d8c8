//! # FormThinker Editor
//!
//! Document mutation and update-scheduling engine for schema-driven forms.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ widgets: onChange(path, value, remove)      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ scheduler: per-path debounce                │
//! │            → trailing throttle at the sink  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ mutations: apply(doc, path, patch) → doc'   │
//! │  - coercive Set                             │
//! │  - Delete with empty-ancestor pruning       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ host: setData(prev → next), re-render       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Documents are values**: `apply` never mutates its input
//! 2. **Robust over strict**: structural conflicts are overwritten, never raised
//! 3. **Bounded commits**: bursts of edits collapse into one commit per interval
//! 4. **Scoped timers**: disposing a session cancels everything pending
//!
//! ## Usage
//!
//! ```rust,ignore
//! use formthinker_editor::{EditSession, EditorConfig};
//! use formthinker_common::Value;
//! use tokio::sync::watch;
//!
//! let (sink, mut rendered) = watch::channel(Value::object());
//! let session = EditSession::spawn(&EditorConfig::default(), sink);
//!
//! let widget = session.handle();
//! widget.on_change("title", "Hello".into(), false)?;
//!
//! rendered.changed().await?;
//! ```

mod config;
mod device;
mod document;
mod errors;
mod mutations;
mod scheduler;
mod session;

pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use device::{
    decode, encode, is_device_value, Decoded, Device, DeviceField, UnknownDevice,
    DEVICE_SEPARATOR,
};
pub use document::Document;
pub use errors::EditorError;
pub use mutations::{apply, read, Patch};
pub use scheduler::{Commit, UpdateScheduler};
pub use session::{DocumentSink, EditSession, SessionHandle, Updater};

// Re-export common types for convenience
pub use formthinker_common::{Path, PathSegment, Value};
