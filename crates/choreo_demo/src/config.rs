// SPDX-License-Identifier: MIT OR Apache-2.0
//! Demo host configuration.

use choreo_core::config::load_ron;
use choreo_core::{ChoreographerConfig, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a headless playback session, stored as RON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Simulated frames per second
    pub frame_rate: u32,
    /// Print every changed frame as a JSON line
    pub emit_json: bool,
    /// Choreographer behavior
    pub choreographer: ChoreographerConfig,
    /// Performance ratings of the roster, out of 5
    pub roster: Vec<u8>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            emit_json: false,
            choreographer: ChoreographerConfig::default(),
            roster: vec![4, 5, 3, 1],
        }
    }
}

impl DemoConfig {
    /// Load from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_ron(path)
    }

    /// Milliseconds between simulated frames
    pub fn frame_interval_ms(&self) -> Option<f64> {
        (self.frame_rate > 0).then(|| 1000.0 / f64::from(self.frame_rate))
    }
}
