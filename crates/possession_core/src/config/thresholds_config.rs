//! Detection thresholds.
//!
//! Both values are tuning knobs rather than physical constants:
//!
//! | Key | Unit | Meaning |
//! |-----|------|---------|
//! | `control_radius` | m | Max ball-player distance that counts as control |
//! | `min_possession_duration` | s | Shorter episodes are discarded |

use serde::{Deserialize, Serialize};

/// Default control radius (meters).
pub const DEFAULT_CONTROL_RADIUS_M: f64 = 1.5;

/// Default minimum episode duration (seconds).
pub const DEFAULT_MIN_POSSESSION_DURATION_S: f64 = 0.5;

/// `thresholds` section of the analyzer config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ThresholdsConfig {
    pub ball_possession: BallPossessionThresholds,
}

/// `thresholds.ball_possession` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallPossessionThresholds {
    /// Distance within which a player controls the ball (meters)
    pub control_radius: f64,
    /// Episodes shorter than this are never logged (seconds)
    pub min_possession_duration: f64,
}

impl Default for BallPossessionThresholds {
    fn default() -> Self {
        Self {
            control_radius: DEFAULT_CONTROL_RADIUS_M,
            min_possession_duration: DEFAULT_MIN_POSSESSION_DURATION_S,
        }
    }
}
