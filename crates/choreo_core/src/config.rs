// SPDX-License-Identifier: MIT OR Apache-2.0
//! Choreographer configuration.
//!
//! Stored as RON, e.g.
//!
//! ```text
//! ChoreographerConfig(
//!     cancel_on_dispose: false,
//!     notify_unchanged: false,
//! )
//! ```

use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Read a RON file into any deserializable settings type
pub fn load_ron<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(ron::from_str(&content)?)
}

/// Behavior switches for a [`Choreographer`](crate::Choreographer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoreographerConfig {
    /// On dispose, cancel active runs silently (`true`) or fast-forward
    /// them to their end and deliver completion (`false`)
    pub cancel_on_dispose: bool,
    /// Call tick listeners on every tick, not only when values changed
    pub notify_unchanged: bool,
}

impl Default for ChoreographerConfig {
    fn default() -> Self {
        Self {
            cancel_on_dispose: true,
            notify_unchanged: false,
        }
    }
}

impl ChoreographerConfig {
    /// Parse from RON text
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Load from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_ron(path)
    }

    /// Serialize to pretty RON
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let config = ron::ser::PrettyConfig::default().struct_names(true);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Write to a RON file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }
}
