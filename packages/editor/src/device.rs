//! # Device Variants
//!
//! A field can hold one value per viewport. The three values are stored as a
//! single string joined by [`DEVICE_SEPARATOR`]; a stored value without the
//! separator is a plain uniform value. Separator presence is the only signal
//! that device support is on for a path.
//!
//! There is no escaping: a segment that itself contains the separator splits
//! into extra parts on decode, and everything past the third part is dropped.

use crate::mutations::Patch;
use formthinker_common::Value;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Reserved token between the mobile, tablet and desktop segments
pub const DEVICE_SEPARATOR: &str = "|-|D|-|";

/// Viewport a segment belongs to, in storage order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Mobile,
    Tablet,
    Desktop,
}

impl Device {
    pub const ALL: [Device; 3] = [Device::Mobile, Device::Tablet, Device::Desktop];

    /// Segment position inside an encoded value
    pub fn index(self) -> usize {
        match self {
            Device::Mobile => 0,
            Device::Tablet => 1,
            Device::Desktop => 2,
        }
    }
}

impl Display for Device {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Device::Mobile => "mobile",
            Device::Tablet => "tablet",
            Device::Desktop => "desktop",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown device: {0}")]
pub struct UnknownDevice(pub String);

impl FromStr for Device {
    type Err = UnknownDevice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(Device::Mobile),
            "tab" | "tablet" => Ok(Device::Tablet),
            "desktop" => Ok(Device::Desktop),
            other => Err(UnknownDevice(other.to_string())),
        }
    }
}

/// Result of decoding a stored scalar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// No separator: one value for every viewport
    Uniform(String),
    /// Mobile, tablet, desktop
    Variants([String; 3]),
}

/// Join three segments into one stored value
pub fn encode<S: AsRef<str>>(segments: &[S; 3]) -> String {
    let [mobile, tablet, desktop] = segments;
    [mobile.as_ref(), tablet.as_ref(), desktop.as_ref()].join(DEVICE_SEPARATOR)
}

/// Split a stored value, padding short input and truncating long input
pub fn decode(raw: &str) -> Decoded {
    if !raw.contains(DEVICE_SEPARATOR) {
        return Decoded::Uniform(raw.to_string());
    }

    let mut parts = raw.split(DEVICE_SEPARATOR);
    Decoded::Variants(std::array::from_fn(|_| {
        parts.next().unwrap_or_default().to_string()
    }))
}

/// Whether a stored document value carries per-device segments
pub fn is_device_value(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.contains(DEVICE_SEPARATOR))
}

/// Per-path device state for one widget
///
/// Mirrors what the widget shows: whether device support is on, which
/// viewport is being edited, and the three segment values. Every edit
/// returns the [`Patch`] to hand to the scheduler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceField {
    enabled: bool,
    active: Device,
    segments: [String; 3],
    stored: Value,
}

impl DeviceField {
    /// Build the state for a freshly rendered widget
    pub fn from_stored(stored: Option<&Value>) -> Self {
        let mut field = Self {
            enabled: stored.is_some_and(is_device_value),
            ..Self::default()
        };
        field.sync(stored);
        field
    }

    /// Re-read the stored value after the host re-renders
    pub fn sync(&mut self, stored: Option<&Value>) {
        self.stored = stored.cloned().unwrap_or_default();

        if !self.enabled {
            self.segments = Default::default();
            return;
        }

        if let Some(Decoded::Variants(segments)) = self.stored.as_str().map(decode) {
            self.segments = segments;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn active(&self) -> Device {
        self.active
    }

    pub fn segments(&self) -> &[String; 3] {
        &self.segments
    }

    /// Choose which viewport subsequent edits target
    pub fn select(&mut self, device: Device) {
        self.active = device;
    }

    /// Turn device support on.
    ///
    /// Discards the uniform value currently stored at the path; the caller
    /// confirms with the user before calling this.
    pub fn enable(&mut self) -> Patch {
        self.enabled = true;
        self.segments = Default::default();
        Patch::Set(Value::String(encode(&self.segments)))
    }

    /// Turn device support off, discarding all three segments
    pub fn disable(&mut self) -> Patch {
        self.enabled = false;
        self.segments = Default::default();
        Patch::Set(Value::String(String::new()))
    }

    /// Record an edit from the wrapped widget.
    ///
    /// With device support on the whole composite is written back, never a
    /// bare scalar.
    pub fn edit(&mut self, value: Value) -> Patch {
        if !self.enabled {
            return Patch::Set(value);
        }

        self.segments[self.active.index()] = segment_text(&value);
        Patch::Set(Value::String(encode(&self.segments)))
    }

    /// Value the wrapped widget should display
    pub fn current(&self) -> Value {
        if self.enabled {
            Value::String(self.segments[self.active.index()].clone())
        } else {
            self.stored.clone()
        }
    }
}

fn segment_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => serde_json::Value::from(other).to_string(),
    }
}
