//! # Possession Aggregator
//!
//! Stateless summary over the finalized episode log.
//!
//! ## Time window
//! With a window of `w` seconds only events whose start is at least
//! `last_start - w` are kept. The log is chronological, so this is a
//! suffix of the log.
//!
//! Percentages are shares of the summed duration of the kept events.
//! An empty log, or a zero total, yields `None`.

use std::collections::BTreeMap;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::models::{PlayerId, PossessionEvent, Team, Zone};

/// Per-team value pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TeamSplit<T> {
    pub home: T,
    pub away: T,
}

impl<T: Copy> TeamSplit<T> {
    pub fn get(&self, team: Team) -> T {
        match team {
            Team::Home => self.home,
            Team::Away => self.away,
        }
    }
}

/// Per-zone percentages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ZoneSplit {
    pub defensive: f64,
    pub middle: f64,
    pub attacking: f64,
}

impl ZoneSplit {
    pub fn get(&self, zone: Zone) -> f64 {
        match zone {
            Zone::Defensive => self.defensive,
            Zone::Middle => self.middle,
            Zone::Attacking => self.attacking,
        }
    }
}

/// Summary statistics of a possession log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PossessionSummary {
    /// Share of total time per team, in percent
    pub team_possession: TeamSplit<f64>,
    /// Share of total time per start zone, in percent
    pub zone_possession: ZoneSplit,
    /// Seconds of possession per (team, player)
    #[serde(serialize_with = "serialize_player_possession")]
    pub player_possession: BTreeMap<(Team, PlayerId), f64>,
    /// Summed duration of the summarized events, in seconds
    pub total_time: f64,
    pub possession_counts: TeamSplit<usize>,
}

impl PossessionSummary {
    pub fn player_time(&self, team: Team, player_id: PlayerId) -> Option<f64> {
        self.player_possession.get(&(team, player_id)).copied()
    }
}

#[derive(Serialize)]
struct PlayerEntry {
    team: Team,
    player_id: PlayerId,
    seconds: f64,
}

// Tuple keys are not valid JSON object keys, so emit a list of entries.
fn serialize_player_possession<S: Serializer>(
    map: &BTreeMap<(Team, PlayerId), f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(map.len()))?;
    for (&(team, player_id), &seconds) in map {
        seq.serialize_element(&PlayerEntry {
            team,
            player_id,
            seconds,
        })?;
    }
    seq.end()
}

/// Events that fall inside `time_window` seconds of the last event's start.
pub fn window_events(log: &[PossessionEvent], time_window: Option<f64>) -> &[PossessionEvent] {
    let (Some(window), Some(last)) = (time_window, log.last()) else {
        return log;
    };
    let cutoff = last.start_timestamp - window;
    let first_kept = log
        .iter()
        .position(|ev| ev.start_timestamp >= cutoff)
        .unwrap_or(log.len());
    &log[first_kept..]
}

/// Summarize a finalized log. Returns `None` when there is nothing to report.
pub fn summarize(log: &[PossessionEvent], time_window: Option<f64>) -> Option<PossessionSummary> {
    let events = window_events(log, time_window);
    if events.is_empty() {
        return None;
    }

    let total: f64 = events.iter().map(|ev| ev.duration).sum();
    if total == 0.0 {
        return None;
    }

    let mut team_time = TeamSplit::<f64>::default();
    let mut counts = TeamSplit::<usize>::default();
    let mut zone_time = ZoneSplit::default();
    let mut player_possession = BTreeMap::new();

    for ev in events {
        match ev.team {
            Team::Home => {
                team_time.home += ev.duration;
                counts.home += 1;
            }
            Team::Away => {
                team_time.away += ev.duration;
                counts.away += 1;
            }
        }
        match ev.zone {
            Zone::Defensive => zone_time.defensive += ev.duration,
            Zone::Middle => zone_time.middle += ev.duration,
            Zone::Attacking => zone_time.attacking += ev.duration,
        }
        *player_possession.entry((ev.team, ev.player_id)).or_insert(0.0) += ev.duration;
    }

    let pct = |value: f64| value / total * 100.0;

    Some(PossessionSummary {
        team_possession: TeamSplit {
            home: pct(team_time.home),
            away: pct(team_time.away),
        },
        zone_possession: ZoneSplit {
            defensive: pct(zone_time.defensive),
            middle: pct(zone_time.middle),
            attacking: pct(zone_time.attacking),
        },
        player_possession,
        total_time: total,
        possession_counts: counts,
    })
}
