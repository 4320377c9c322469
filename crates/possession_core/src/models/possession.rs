//! Possession outputs: per-frame results and finalized episodes.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::types::{PlayerId, Position, Team, Zone};

/// Player id reported when nobody controls the ball.
pub const NO_PLAYER_ID: i64 = -1;

/// The team and player controlling the ball in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BallControl {
    pub team: Team,
    pub player_id: PlayerId,
}

/// Result of one `step` call.
///
/// `zone` is classified from the current ball position every frame and
/// may differ from the open episode's start zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameResult {
    pub control: Option<BallControl>,
    pub zone: Option<Zone>,
    /// Ball displacement since the previous frame (0 on the first frame)
    pub displacement: f64,
}

impl FrameResult {
    pub fn team(&self) -> Option<Team> {
        self.control.map(|c| c.team)
    }

    /// Controller id, or [`NO_PLAYER_ID`] when nobody controls the ball.
    pub fn player_id_or_sentinel(&self) -> i64 {
        self.control
            .map(|c| i64::from(c.player_id))
            .unwrap_or(NO_PLAYER_ID)
    }
}

// Flat wire shape: "none" / -1 stand in for the absent values.
impl Serialize for FrameResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("FrameResult", 4)?;
        s.serialize_field("team", self.team().map_or("none", Team::as_str))?;
        s.serialize_field("player_id", &self.player_id_or_sentinel())?;
        s.serialize_field("zone", self.zone.map_or("none", Zone::as_str))?;
        s.serialize_field("displacement", &self.displacement)?;
        s.end()
    }
}

/// One possession episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossessionEvent {
    pub team: Team,
    /// Controller at episode start; not re-evaluated while the episode runs
    pub player_id: PlayerId,
    /// Zone of the start position, fixed for the episode's lifetime
    pub zone: Zone,
    /// Ball position when the episode opened
    pub start_position: Position,
    pub start_timestamp: f64,
    /// Seconds since `start_timestamp` as of the latest continuing frame
    pub duration: f64,
    /// Summed ball displacement while the episode was open
    pub distance_covered: f64,
}

impl PossessionEvent {
    pub fn open(
        control: BallControl,
        zone: Zone,
        start_position: Position,
        start_timestamp: f64,
    ) -> Self {
        Self {
            team: control.team,
            player_id: control.player_id,
            zone,
            start_position,
            start_timestamp,
            duration: 0.0,
            distance_covered: 0.0,
        }
    }

    pub fn end_timestamp(&self) -> f64 {
        self.start_timestamp + self.duration
    }
}
