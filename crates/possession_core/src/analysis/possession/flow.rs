//! # Possession Flow
//!
//! Read-only views of the episode log for timeline and pitch-map displays.
//! Nothing here feeds back into detection.

use serde::Serialize;

use super::aggregator::window_events;
use crate::models::{PossessionEvent, Position, Team};

/// One coloured span of the possession timeline.
///
/// Times are seconds relative to the start of the first selected event.
/// `team == None` marks a gap with no logged possession.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowSegment {
    pub start: f64,
    pub end: f64,
    pub team: Option<Team>,
}

impl FlowSegment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_gap(&self) -> bool {
        self.team.is_none()
    }
}

/// Timeline of the last `last_n` events with gap segments in between.
///
/// A gap is inserted whenever an event does not start exactly where the
/// previous one ended.
pub fn possession_flow(log: &[PossessionEvent], last_n: usize) -> Vec<FlowSegment> {
    let events = &log[log.len().saturating_sub(last_n)..];
    let Some(first) = events.first() else {
        return Vec::new();
    };
    let origin = first.start_timestamp;

    let mut segments = Vec::with_capacity(events.len() * 2);
    let mut prev_end: Option<f64> = None;
    for ev in events {
        let start = ev.start_timestamp - origin;
        let end = start + ev.duration;
        if let Some(prev_end) = prev_end {
            if start != prev_end {
                segments.push(FlowSegment {
                    start: prev_end,
                    end: start,
                    team: None,
                });
            }
        }
        segments.push(FlowSegment {
            start,
            end,
            team: Some(ev.team),
        });
        prev_end = Some(end);
    }
    segments
}

/// Where an episode started, for scatter-style pitch maps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapPoint {
    pub position: Position,
    pub team: Team,
    /// Episode duration in seconds (marker size)
    pub duration: f64,
}

/// Start points of the events inside `time_window` of the last event.
pub fn possession_map(log: &[PossessionEvent], time_window: Option<f64>) -> Vec<MapPoint> {
    window_events(log, time_window)
        .iter()
        .map(|ev| MapPoint {
            position: ev.start_position,
            team: ev.team,
            duration: ev.duration,
        })
        .collect()
}
