//! # possession_core - Ball Possession Analysis
//!
//! Turns per-frame tracking data (ball plus both teams' player positions)
//! into ball control, possession episodes and summary statistics.
//!
//! ## Features
//! - Nearest-player control assignment with a configurable radius
//! - Episode lifecycle with a minimum-duration filter
//! - Team, zone and per-player possession shares
//! - Fully deterministic: replaying the same frames gives the same log
//!
//! ## Usage
//! ```rust
//! use possession_core::{summarize, AnalyzerConfig, Frame, Position, PossessionAnalyzer};
//!
//! let config = AnalyzerConfig::default().with_thresholds(1.0, 0.5);
//! let mut analyzer = PossessionAnalyzer::new(config);
//! for t in 0..3 {
//!     let frame = Frame::new(t as f64, Position::new(10.0, 10.0)).with_home(7, 10.0, 10.2);
//!     analyzer.step_frame(&frame);
//! }
//! analyzer.step_frame(&Frame::new(3.0, Position::new(10.0, 10.0)));
//!
//! let summary = summarize(analyzer.episodes(), None).expect("one episode");
//! assert_eq!(summary.possession_counts.home, 1);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod models;

pub use analysis::possession::{
    assign, classify, possession_flow, possession_map, summarize, AnalyzerState, FlowSegment,
    MapPoint, PossessionAnalyzer, PossessionSummary, TeamSplit, ZoneSplit,
};
pub use config::AnalyzerConfig;
pub use error::{ConfigError, Result};
pub use models::{
    BallControl, Frame, FrameResult, PlayerId, PlayerPosition, Position, PossessionEvent, Team,
    Zone, NO_PLAYER_ID,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
