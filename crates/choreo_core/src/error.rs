// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for choreography construction and playback.

/// Result alias used throughout the crate
pub type ChoreoResult<T> = Result<T, ChoreoError>;

/// Error raised while building a timeline or starting a run
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChoreoError {
    /// A duration, delay or interval was negative or not finite
    #[error("Invalid parameter `{name}`: {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Two siblings of a parallel group animate the same property
    #[error("Duplicate property in parallel group: {0}")]
    DuplicateProperty(String),

    /// A run with this name is already active
    #[error("Run already active: {0}")]
    DuplicateRunName(String),

    /// No active run with this name
    #[error("Unknown run: {0}")]
    UnknownRun(String),
}

impl ChoreoError {
    /// Validate a millisecond parameter (finite and non-negative)
    pub(crate) fn check_millis(name: &'static str, value: f64) -> ChoreoResult<f64> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(ChoreoError::InvalidParameter { name, value })
        }
    }
}

/// Error while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the config file failed
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config text is not valid RON for the expected shape
    #[error("Failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// The config could not be written as RON
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}
