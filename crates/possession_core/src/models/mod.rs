//! Data model shared by the analyzer and its callers.

pub mod possession;
pub mod types;

pub use possession::{BallControl, FrameResult, PossessionEvent, NO_PLAYER_ID};
pub use types::{Frame, PlayerId, PlayerPosition, Position, Team, Zone};
