//! Tracking-frame primitives.
//!
//! Coordinates are real-world pitch meters. Player ids are stable and
//! unique within one team for a given frame.

use serde::{Deserialize, Serialize};

/// Tracked player identifier.
pub type PlayerId = u32;

/// Side of the match. Episodes are only ever created for one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Home,
    Away,
}

impl Team {
    pub fn as_str(self) -> &'static str {
        match self {
            Team::Home => "home",
            Team::Away => "away",
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Pitch third, relative to a team's attacking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Defensive,
    Middle,
    Attacking,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Defensive, Zone::Middle, Zone::Attacking];

    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Defensive => "defensive",
            Zone::Middle => "middle",
            Zone::Attacking => "attacking",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Position on the pitch in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance. Non-finite inputs yield NaN or infinity.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One roster entry of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPosition {
    pub player_id: PlayerId,
    pub position: Position,
}

impl PlayerPosition {
    pub fn new(player_id: PlayerId, x: f64, y: f64) -> Self {
        Self {
            player_id,
            position: Position::new(x, y),
        }
    }
}

/// A single tracking sample.
///
/// Rosters may be empty when no player of that team is tracked.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    /// Seconds since the start of the feed. Non-decreasing across frames.
    pub timestamp: f64,
    pub ball: Position,
    #[serde(default)]
    pub home: Vec<PlayerPosition>,
    #[serde(default)]
    pub away: Vec<PlayerPosition>,
}

impl Frame {
    pub fn new(timestamp: f64, ball: Position) -> Self {
        Self {
            timestamp,
            ball,
            home: Vec::new(),
            away: Vec::new(),
        }
    }

    pub fn with_home(mut self, player_id: PlayerId, x: f64, y: f64) -> Self {
        self.home.push(PlayerPosition::new(player_id, x, y));
        self
    }

    pub fn with_away(mut self, player_id: PlayerId, x: f64, y: f64) -> Self {
        self.away.push(PlayerPosition::new(player_id, x, y));
        self
    }

    pub fn roster(&self, team: Team) -> &[PlayerPosition] {
        match team {
            Team::Home => &self.home,
            Team::Away => &self.away,
        }
    }

    pub fn roster_mut(&mut self, team: Team) -> &mut Vec<PlayerPosition> {
        match team {
            Team::Home => &mut self.home,
            Team::Away => &mut self.away,
        }
    }
}
