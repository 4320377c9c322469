//! Analysis report assembly and output.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use possession_core::{
    possession_flow, possession_map, summarize, AnalyzerConfig, FlowSegment, Frame, FrameResult,
    MapPoint, PossessionAnalyzer, PossessionEvent, PossessionSummary,
};
use serde::Serialize;

/// Options for a single analysis run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Summarize only events within this many seconds of the last one
    pub time_window: Option<f64>,
    /// Close the episode still open at end of stream
    pub flush: bool,
}

/// Everything produced by one run over a frame sequence.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub frame_results: Vec<FrameResult>,
    pub report: Report,
}

/// JSON report written by `possession analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Creation time (RFC3339)
    pub generated_at: String,
    pub frames: usize,
    pub config: AnalyzerConfig,
    pub time_window: Option<f64>,
    /// `null` when no episode qualifies
    pub summary: Option<PossessionSummary>,
    /// Episode start points inside the window
    pub map: Vec<MapPoint>,
    pub episodes: Vec<PossessionEvent>,
}

/// Run the analyzer over `frames` and assemble the report.
pub fn analyze_frames(config: AnalyzerConfig, frames: &[Frame], options: RunOptions) -> AnalysisRun {
    let mut analyzer = PossessionAnalyzer::new(config);
    let frame_results = analyzer.process(frames);
    if options.flush {
        analyzer.flush();
    }

    let episodes = analyzer.into_episodes();
    let summary = summarize(&episodes, options.time_window);
    let map = possession_map(&episodes, options.time_window);
    if summary.is_none() {
        tracing::warn!("no qualifying possession episodes");
    }
    tracing::info!(
        frames = frames.len(),
        episodes = episodes.len(),
        "analysis complete"
    );

    AnalysisRun {
        frame_results,
        report: Report {
            generated_at: chrono::Utc::now().to_rfc3339(),
            frames: frames.len(),
            config,
            time_window: options.time_window,
            summary,
            map,
            episodes,
        },
    }
}

/// Flow segments for the last `last_n` episodes of a run.
pub fn flow_segments(config: AnalyzerConfig, frames: &[Frame], last_n: usize, flush: bool) -> Vec<FlowSegment> {
    let run = analyze_frames(
        config,
        frames,
        RunOptions {
            time_window: None,
            flush,
        },
    );
    possession_flow(&run.report.episodes, last_n)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write: {}", path.display()))?;
    Ok(())
}

/// Write per-frame results as JSON lines.
pub fn write_frame_results(path: &Path, results: &[FrameResult]) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create: {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for result in results {
        serde_json::to_writer(&mut out, result)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Human-readable summary lines.
pub fn format_summary(summary: Option<&PossessionSummary>) -> String {
    let Some(s) = summary else {
        return "No possession data".to_string();
    };
    let mut out = String::new();
    out.push_str(&format!(
        "Team possession:  home {:.1}% | away {:.1}%\n",
        s.team_possession.home, s.team_possession.away
    ));
    out.push_str(&format!(
        "Zone possession:  defensive {:.1}% | middle {:.1}% | attacking {:.1}%\n",
        s.zone_possession.defensive, s.zone_possession.middle, s.zone_possession.attacking
    ));
    out.push_str(&format!(
        "Episodes:         home {} | away {}\n",
        s.possession_counts.home, s.possession_counts.away
    ));
    out.push_str(&format!("Total time:       {:.2}s\n", s.total_time));
    for ((team, player_id), seconds) in &s.player_possession {
        out.push_str(&format!("  {:<4} #{:<4} {:>8.2}s\n", team, player_id, seconds));
    }
    out
}
