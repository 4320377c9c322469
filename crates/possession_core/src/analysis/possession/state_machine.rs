//! # Possession State Machine
//!
//! Per-frame driver that turns ball control into possession episodes.
//!
//! ## States
//! - `Idle`: no open episode
//! - `Open(team)`: an episode for `team` is in progress
//!
//! ## Transitions
//! | From | Frame control | Action |
//! |------|---------------|--------|
//! | Idle | team | open episode |
//! | Open(t) | t | extend duration and distance |
//! | Open(a) | b != a | close a, open b |
//! | Open(t) | none | close t, go Idle |
//! | Idle | none | nothing |
//!
//! Closing appends the episode to the log only when its duration is at
//! least `min_possession_duration`. A single "none" frame closes an
//! episode immediately.
//!
//! One analyzer tracks one match. It is not meant to be shared between
//! threads; run one instance per match instead.

use tracing::{debug, trace};

use super::assigner::assign;
use super::zone::classify;
use crate::config::AnalyzerConfig;
use crate::models::{
    BallControl, Frame, FrameResult, PlayerPosition, PossessionEvent, Position, Team,
};

/// Mutable analyzer state. Only `step` and `flush` change it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzerState {
    pub current: Option<PossessionEvent>,
    pub previous_ball: Option<Position>,
    /// Finalized episodes in chronological order
    pub log: Vec<PossessionEvent>,
}

impl AnalyzerState {
    /// Team of the open episode, `None` when idle.
    pub fn open_team(&self) -> Option<Team> {
        self.current.as_ref().map(|ev| ev.team)
    }
}

/// Possession detector for a single match.
#[derive(Debug, Clone)]
pub struct PossessionAnalyzer {
    config: AnalyzerConfig,
    state: AnalyzerState,
}

impl PossessionAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            state: AnalyzerState::default(),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn state(&self) -> &AnalyzerState {
        &self.state
    }

    /// Episode currently in progress, if any.
    pub fn current_episode(&self) -> Option<&PossessionEvent> {
        self.state.current.as_ref()
    }

    /// Finalized episode log.
    pub fn episodes(&self) -> &[PossessionEvent] {
        &self.state.log
    }

    pub fn into_episodes(self) -> Vec<PossessionEvent> {
        self.state.log
    }

    /// Process one frame.
    pub fn step(
        &mut self,
        timestamp: f64,
        ball: Position,
        home: &[PlayerPosition],
        away: &[PlayerPosition],
    ) -> FrameResult {
        let control = assign(&ball, home, away, self.config.control_radius());

        let displacement = self
            .state
            .previous_ball
            .map(|prev| ball.distance_to(&prev))
            .unwrap_or(0.0);

        match (self.state.open_team(), control) {
            (None, Some(control)) => self.open_episode(control, ball, timestamp),
            (Some(team), Some(control)) if team == control.team => {
                if let Some(current) = self.state.current.as_mut() {
                    current.duration = timestamp - current.start_timestamp;
                    current.distance_covered += displacement;
                }
            }
            (Some(_), Some(control)) => {
                self.close_episode();
                self.open_episode(control, ball, timestamp);
            }
            (Some(_), None) => self.close_episode(),
            (None, None) => {}
        }

        self.state.previous_ball = Some(ball);

        let zone = control.map(|c| classify(ball.y, self.config.field.length, c.team));
        trace!(timestamp, ?control, ?zone, displacement, "frame processed");

        FrameResult {
            control,
            zone,
            displacement,
        }
    }

    pub fn step_frame(&mut self, frame: &Frame) -> FrameResult {
        self.step(frame.timestamp, frame.ball, &frame.home, &frame.away)
    }

    /// Run a whole frame sequence, returning the per-frame results.
    pub fn process<'a, I>(&mut self, frames: I) -> Vec<FrameResult>
    where
        I: IntoIterator<Item = &'a Frame>,
    {
        frames.into_iter().map(|f| self.step_frame(f)).collect()
    }

    /// Close the open episode at end of stream.
    ///
    /// Same duration rule as any other close. Returns the episode when it
    /// made it into the log.
    pub fn flush(&mut self) -> Option<&PossessionEvent> {
        let before = self.state.log.len();
        if self.state.current.is_some() {
            self.close_episode();
        }
        if self.state.log.len() > before {
            self.state.log.last()
        } else {
            None
        }
    }

    fn open_episode(&mut self, control: BallControl, ball: Position, timestamp: f64) {
        let zone = classify(ball.y, self.config.field.length, control.team);
        debug!(
            team = %control.team,
            player_id = control.player_id,
            %zone,
            timestamp,
            "possession opened"
        );
        self.state.current = Some(PossessionEvent::open(control, zone, ball, timestamp));
    }

    fn close_episode(&mut self) {
        let Some(episode) = self.state.current.take() else {
            return;
        };
        if episode.duration >= self.config.min_possession_duration() {
            debug!(
                team = %episode.team,
                player_id = episode.player_id,
                start = episode.start_timestamp,
                duration = episode.duration,
                "possession finalized"
            );
            self.state.log.push(episode);
        } else {
            debug!(
                team = %episode.team,
                start = episode.start_timestamp,
                duration = episode.duration,
                "possession discarded below minimum duration"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Zone;
    use proptest::prelude::*;

    fn analyzer(radius: f64, min_duration: f64) -> PossessionAnalyzer {
        PossessionAnalyzer::new(
            AnalyzerConfig::default()
                .with_field_length(100.0)
                .with_thresholds(radius, min_duration),
        )
    }

    fn home_frame(t: f64, x: f64, y: f64) -> Frame {
        Frame::new(t, Position::new(x, y)).with_home(7, x, y + 0.2)
    }

    fn away_frame(t: f64, x: f64, y: f64) -> Frame {
        Frame::new(t, Position::new(x, y)).with_away(11, x + 0.2, y)
    }

    fn loose_frame(t: f64, x: f64, y: f64) -> Frame {
        Frame::new(t, Position::new(x, y)).with_home(7, x + 20.0, y)
    }

    #[test]
    fn test_idle_none_is_noop() {
        let mut a = analyzer(1.0, 0.5);
        let r = a.step_frame(&loose_frame(0.0, 10.0, 10.0));
        assert!(r.control.is_none());
        assert!(r.zone.is_none());
        assert!(a.current_episode().is_none());
        assert!(a.episodes().is_empty());
    }

    #[test]
    fn test_single_home_episode_scenario() {
        let mut a = analyzer(1.0, 0.5);
        for t in 0..3 {
            a.step_frame(&home_frame(t as f64, 10.0, 10.0));
        }
        let r = a.step_frame(&loose_frame(3.0, 10.0, 10.0));
        assert!(r.control.is_none());
        assert_eq!(a.episodes().len(), 1);
        let ev = &a.episodes()[0];
        assert_eq!(ev.team, Team::Home);
        assert_eq!(ev.player_id, 7);
        assert_eq!(ev.zone, Zone::Defensive);
        assert!((ev.duration - 2.0).abs() < 1e-9);
        assert!(a.current_episode().is_none());
    }

    #[test]
    fn test_short_episode_discarded() {
        let mut a = analyzer(1.0, 0.5);
        a.step_frame(&home_frame(0.0, 10.0, 10.0));
        a.step_frame(&home_frame(0.1, 10.0, 10.0));
        a.step_frame(&loose_frame(0.2, 10.0, 10.0));
        assert!(a.episodes().is_empty());
    }

    #[test]
    fn test_team_switch_closes_and_opens() {
        let mut a = analyzer(1.0, 0.5);
        a.step_frame(&home_frame(0.0, 10.0, 10.0));
        a.step_frame(&home_frame(1.0, 10.0, 12.0));
        let r = a.step_frame(&away_frame(2.0, 10.0, 80.0));
        assert_eq!(r.team(), Some(Team::Away));
        assert_eq!(a.episodes().len(), 1);
        assert_eq!(a.episodes()[0].team, Team::Home);
        let open = a.current_episode().unwrap();
        assert_eq!(open.team, Team::Away);
        assert_eq!(open.zone, Zone::Defensive);
        assert_eq!(open.duration, 0.0);
        assert_eq!(open.distance_covered, 0.0);
        assert!((open.start_timestamp - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_switch_below_minimum_drops_old_episode() {
        let mut a = analyzer(1.0, 0.5);
        a.step_frame(&home_frame(0.0, 10.0, 10.0));
        a.step_frame(&home_frame(0.2, 10.0, 10.0));
        a.step_frame(&away_frame(0.4, 10.0, 10.0));
        assert!(a.episodes().is_empty());
        assert_eq!(a.state().open_team(), Some(Team::Away));
    }

    #[test]
    fn test_zone_fixed_at_start_but_reported_per_frame() {
        let mut a = analyzer(1.0, 0.5);
        a.step_frame(&home_frame(0.0, 10.0, 10.0));
        let r = a.step_frame(&home_frame(1.0, 10.0, 90.0));
        assert_eq!(r.zone, Some(Zone::Attacking));
        assert_eq!(a.current_episode().unwrap().zone, Zone::Defensive);
    }

    #[test]
    fn test_distance_covered_accumulates_displacement() {
        let mut a = analyzer(1.0, 0.5);
        let r0 = a.step_frame(&home_frame(0.0, 10.0, 10.0));
        assert_eq!(r0.displacement, 0.0);
        let r1 = a.step_frame(&home_frame(1.0, 13.0, 14.0));
        assert!((r1.displacement - 5.0).abs() < 1e-9);
        a.step_frame(&home_frame(2.0, 13.0, 17.0));
        let ev = a.current_episode().unwrap();
        assert!((ev.distance_covered - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_displacement_tracked_while_idle() {
        let mut a = analyzer(1.0, 0.5);
        a.step_frame(&loose_frame(0.0, 0.0, 0.0));
        let r = a.step_frame(&loose_frame(1.0, 3.0, 4.0));
        assert!((r.displacement - 5.0).abs() < 1e-9);
        // the opening frame's displacement is not credited to the new episode
        a.step_frame(&home_frame(2.0, 6.0, 8.0));
        assert_eq!(a.current_episode().unwrap().distance_covered, 0.0);
    }

    #[test]
    fn test_player_id_fixed_at_episode_start() {
        let mut a = analyzer(1.0, 0.5);
        a.step_frame(&Frame::new(0.0, Position::new(10.0, 10.0)).with_home(4, 10.0, 10.5));
        a.step_frame(&Frame::new(1.0, Position::new(20.0, 10.0)).with_home(8, 20.0, 10.5));
        assert_eq!(a.current_episode().unwrap().player_id, 4);
    }

    #[test]
    fn test_flush_closes_open_episode() {
        let mut a = analyzer(1.0, 0.5);
        a.step_frame(&home_frame(0.0, 10.0, 10.0));
        a.step_frame(&home_frame(1.0, 10.0, 10.0));
        let flushed = a.flush().cloned();
        assert!(flushed.is_some());
        assert_eq!(a.episodes().len(), 1);
        assert!(a.current_episode().is_none());
        assert!(a.flush().is_none());
    }

    #[test]
    fn test_flush_respects_minimum_duration() {
        let mut a = analyzer(1.0, 0.5);
        a.step_frame(&home_frame(0.0, 10.0, 10.0));
        assert!(a.flush().is_none());
        assert!(a.episodes().is_empty());
        assert!(a.current_episode().is_none());
    }

    #[test]
    fn test_empty_rosters_do_not_panic() {
        let mut a = analyzer(1.0, 0.5);
        let r = a.step(0.0, Position::new(1.0, 1.0), &[], &[]);
        assert!(r.control.is_none());
    }

    #[test]
    fn test_nan_ball_closes_episode() {
        let mut a = analyzer(1.0, 0.5);
        a.step_frame(&home_frame(0.0, 10.0, 10.0));
        a.step_frame(&home_frame(1.0, 10.0, 10.0));
        let r = a.step(2.0, Position::new(f64::NAN, 10.0), &[], &[]);
        assert!(r.control.is_none());
        assert!(r.displacement.is_nan());
        assert_eq!(a.episodes().len(), 1);
    }

    #[test]
    fn test_replay_is_deterministic() {
        let frames: Vec<Frame> = (0..40)
            .map(|i| {
                let t = i as f64 * 0.25;
                match (i / 5) % 3 {
                    0 => home_frame(t, 30.0 + i as f64, 20.0),
                    1 => away_frame(t, 30.0 + i as f64, 60.0),
                    _ => loose_frame(t, 30.0, 40.0),
                }
            })
            .collect();
        let mut a = analyzer(1.0, 0.5);
        let mut b = analyzer(1.0, 0.5);
        let ra = a.process(&frames);
        let rb = b.process(&frames);
        assert_eq!(ra, rb);
        assert_eq!(a.episodes(), b.episodes());
        assert!(!a.episodes().is_empty());
    }

    proptest! {
        #[test]
        fn prop_open_duration_non_decreasing(steps in proptest::collection::vec(0.0f64..0.5, 1..30)) {
            let mut a = analyzer(1.0, 0.5);
            let mut t = 0.0;
            let mut last = 0.0;
            a.step_frame(&home_frame(t, 50.0, 50.0));
            for dt in steps {
                t += dt;
                a.step_frame(&home_frame(t, 50.0, 50.0));
                let d = a.current_episode().unwrap().duration;
                prop_assert!(d >= last);
                last = d;
            }
        }

        #[test]
        fn prop_logged_iff_long_enough(duration in 0.0f64..2.0, min in 0.1f64..1.5) {
            let mut a = analyzer(1.0, min);
            a.step_frame(&home_frame(0.0, 50.0, 50.0));
            a.step_frame(&home_frame(duration, 50.0, 50.0));
            a.step_frame(&loose_frame(duration + 0.1, 50.0, 50.0));
            prop_assert_eq!(a.episodes().len() == 1, duration >= min);
        }
    }
}
