//! Tracking data ingestion
//!
//! Two input formats are accepted:
//!
//! * CSV, long format, one row per tracked entity per frame:
//!
//!   ```text
//!   timestamp,entity,player_id,x,y
//!   0.00,ball,,52.1,30.4
//!   0.00,home,7,51.8,30.9
//!   0.00,away,4,60.0,22.0
//!   ```
//!
//!   Consecutive rows with the same timestamp form one frame. `entity` is
//!   `ball`, `home` or `away`; `player_id` is empty for the ball.
//!
//! * JSON, an array of frames as serialized by `possession_core::Frame`.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use possession_core::{Frame, PlayerId, PlayerPosition, Position, Team};
use serde::Deserialize;
use thiserror::Error;

/// Malformed tracking rows.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("line {line}: unknown entity `{entity}` (expected ball, home or away)")]
    UnknownEntity { line: u64, entity: String },

    #[error("line {line}: {team} row without player_id")]
    MissingPlayerId { line: u64, team: Team },

    #[error("frame at t={timestamp}: expected exactly one ball row, found {found}")]
    BallCount { timestamp: f64, found: usize },

    #[error("line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Deserialize)]
struct TrackRow {
    timestamp: f64,
    entity: String,
    player_id: Option<PlayerId>,
    x: f64,
    y: f64,
}

/// Frame under construction while scanning rows.
struct FrameBuilder {
    balls: Vec<Position>,
    frame: Frame,
}

impl FrameBuilder {
    fn new(timestamp: f64) -> Self {
        Self {
            balls: Vec::with_capacity(1),
            frame: Frame::new(timestamp, Position::default()),
        }
    }

    fn build(mut self) -> Result<Frame, IngestError> {
        if self.balls.len() != 1 {
            return Err(IngestError::BallCount {
                timestamp: self.frame.timestamp,
                found: self.balls.len(),
            });
        }
        self.frame.ball = self.balls[0];
        Ok(self.frame)
    }
}

/// Parse long-format CSV tracking rows into frames.
pub fn parse_frames_csv<R: Read>(reader: R) -> Result<Vec<Frame>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut frames = Vec::new();
    let mut current: Option<FrameBuilder> = None;

    for (idx, record) in reader.deserialize::<TrackRow>().enumerate() {
        // header is line 1
        let line = idx as u64 + 2;
        let row = record.map_err(|source| IngestError::Csv { line, source })?;

        let same_frame = current
            .as_ref()
            .is_some_and(|builder| builder.frame.timestamp == row.timestamp);
        if !same_frame {
            if let Some(done) = current.take() {
                if row.timestamp < done.frame.timestamp {
                    tracing::warn!(
                        line,
                        previous = done.frame.timestamp,
                        timestamp = row.timestamp,
                        "timestamps go backwards"
                    );
                }
                frames.push(done.build()?);
            }
            current = Some(FrameBuilder::new(row.timestamp));
        }
        let Some(builder) = current.as_mut() else {
            continue;
        };

        let position = Position::new(row.x, row.y);
        let team = match row.entity.to_ascii_lowercase().as_str() {
            "ball" => {
                builder.balls.push(position);
                continue;
            }
            "home" => Team::Home,
            "away" => Team::Away,
            _ => {
                return Err(IngestError::UnknownEntity {
                    line,
                    entity: row.entity,
                })
            }
        };
        let player_id = row
            .player_id
            .ok_or(IngestError::MissingPlayerId { line, team })?;
        builder.frame.roster_mut(team).push(PlayerPosition {
            player_id,
            position,
        });
    }

    if let Some(done) = current {
        frames.push(done.build()?);
    }
    Ok(frames)
}

/// Parse a JSON array of frames.
pub fn parse_frames_json(json: &str) -> Result<Vec<Frame>> {
    serde_json::from_str(json).context("Failed to parse JSON frames")
}

/// Load frames from a `.csv` or `.json` file.
pub fn read_frames(path: &Path) -> Result<Vec<Frame>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let frames = match ext.as_deref() {
        Some("json") => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read frames file: {}", path.display()))?;
            parse_frames_json(&raw)?
        }
        _ => {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open frames file: {}", path.display()))?;
            parse_frames_csv(file)
                .with_context(|| format!("Failed to parse CSV frames: {}", path.display()))?
        }
    };

    tracing::info!(path = %path.display(), frames = frames.len(), "frames loaded");
    Ok(frames)
}
