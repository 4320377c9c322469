//! # Ball Possession Detection
//!
//! Derives who controls the ball from per-frame tracking data and
//! segments control into possession episodes.
//!
//! - `zone` - Pitch third classification
//! - `assigner` - Nearest-player ball control
//! - `state_machine` - Episode lifecycle driver
//! - `aggregator` - Summary statistics over the episode log
//! - `flow` - Timeline and pitch-map views for display

pub mod aggregator;
pub mod assigner;
pub mod flow;
pub mod state_machine;
pub mod zone;

pub use aggregator::{summarize, window_events, PossessionSummary, TeamSplit, ZoneSplit};
pub use assigner::{assign, nearest_player};
pub use flow::{possession_flow, possession_map, FlowSegment, MapPoint};
pub use state_machine::{AnalyzerState, PossessionAnalyzer};
pub use zone::classify;
