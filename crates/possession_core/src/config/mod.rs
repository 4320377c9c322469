//! # Analyzer Configuration
//!
//! Immutable settings loaded once at startup. The YAML layout is:
//!
//! ```yaml
//! frame_rate: 25.0
//! field:
//!   length: 105.0
//!   width: 68.0
//! thresholds:
//!   ball_possession:
//!     control_radius: 1.5
//!     min_possession_duration: 0.5
//! ```
//!
//! Every key is required when loading from YAML. Missing or non-numeric
//! keys are reported by `serde_yaml`, non-positive values by [`AnalyzerConfig::validate`].
//!
//! ## Usage
//! ```rust
//! use possession_core::config::AnalyzerConfig;
//!
//! let config = AnalyzerConfig::default();
//! assert!(config.validate().is_ok());
//! ```

mod thresholds_config;

pub use thresholds_config::{
    BallPossessionThresholds, ThresholdsConfig, DEFAULT_CONTROL_RADIUS_M,
    DEFAULT_MIN_POSSESSION_DURATION_S,
};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Pitch dimensions in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub length: f64,
    pub width: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            length: 105.0,
            width: 68.0,
        }
    }
}

/// Full analyzer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Tracking frame rate in Hz (informational only)
    pub frame_rate: f64,
    pub field: FieldConfig,
    pub thresholds: ThresholdsConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            frame_rate: 25.0,
            field: FieldConfig::default(),
            thresholds: ThresholdsConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: AnalyzerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&contents)?;
        tracing::debug!(path = %path.display(), ?config, "loaded analyzer config");
        Ok(config)
    }

    /// All values must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("frame_rate", self.frame_rate),
            ("field.length", self.field.length),
            ("field.width", self.field.width),
            (
                "thresholds.ball_possession.control_radius",
                self.thresholds.ball_possession.control_radius,
            ),
            (
                "thresholds.ball_possession.min_possession_duration",
                self.thresholds.ball_possession.min_possession_duration,
            ),
        ];
        for (key, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { key, value });
            }
        }
        Ok(())
    }

    pub fn control_radius(&self) -> f64 {
        self.thresholds.ball_possession.control_radius
    }

    pub fn min_possession_duration(&self) -> f64 {
        self.thresholds.ball_possession.min_possession_duration
    }

    /// Builder-style override used by tests and callers that tune thresholds.
    pub fn with_thresholds(mut self, control_radius: f64, min_possession_duration: f64) -> Self {
        self.thresholds.ball_possession = BallPossessionThresholds {
            control_radius,
            min_possession_duration,
        };
        self
    }

    pub fn with_field_length(mut self, length: f64) -> Self {
        self.field.length = length;
        self
    }
}
