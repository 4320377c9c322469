//! # Spatial Assigner
//!
//! Decides which player, if any, controls the ball in a frame.
//!
//! ## Algorithm
//! 1. Find each team's nearest player to the ball (Euclidean distance)
//! 2. Home nearest within `control_radius` => home controls
//! 3. Otherwise away nearest within `control_radius` => away controls
//! 4. Otherwise nobody
//!
//! Home is evaluated first: whenever the home minimum is within the
//! radius, home gets the ball even if an away player is closer.
//! Empty rosters have an infinite minimum and are never selected.
//! NaN distances fail the `<=` check and route to "nobody".

use crate::models::{BallControl, PlayerId, PlayerPosition, Position, Team};

/// Nearest player of a roster and their distance to the ball.
///
/// Ties keep the first player in roster order. Returns `None` for an
/// empty roster. A non-finite coordinate anywhere in the roster yields a
/// NaN distance, which never passes a radius check.
pub fn nearest_player(ball: &Position, roster: &[PlayerPosition]) -> Option<(PlayerId, f64)> {
    let mut best: Option<(PlayerId, f64)> = None;
    for player in roster {
        let dist = ball.distance_to(&player.position);
        if dist.is_nan() {
            // one NaN makes the whole team's minimum NaN
            return Some((player.player_id, f64::NAN));
        }
        if best.map_or(true, |(_, best_dist)| dist < best_dist) {
            best = Some((player.player_id, dist));
        }
    }
    best
}

/// Assign ball control for one frame.
pub fn assign(
    ball: &Position,
    home: &[PlayerPosition],
    away: &[PlayerPosition],
    control_radius: f64,
) -> Option<BallControl> {
    let within = |team: Team, roster: &[PlayerPosition]| {
        nearest_player(ball, roster)
            .filter(|&(_, dist)| dist <= control_radius)
            .map(|(player_id, _)| BallControl { team, player_id })
    };

    within(Team::Home, home).or_else(|| within(Team::Away, away))
}
