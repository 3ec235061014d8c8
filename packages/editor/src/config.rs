use crate::EditorError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "formthinker.config.json";

/// Timing configuration for the update scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Quiet window a path needs before its value is eligible for commit
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum spacing between commits to the document sink
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_throttle_ms() -> u64 {
    300
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults
    pub fn load(dir: &Path) -> Result<Self, EditorError> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: EditorConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(EditorConfig::default())
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            throttle_ms: default_throttle_ms(),
        }
    }
}
