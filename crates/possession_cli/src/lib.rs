//! Possession CLI Library
//!
//! Tracking file ingestion (CSV / JSON) → `possession_core` analyzer → JSON report

pub mod ingest;
pub mod report;

pub use ingest::{parse_frames_csv, parse_frames_json, read_frames, IngestError};
pub use report::{
    analyze_frames, flow_segments, format_summary, write_frame_results, write_json, AnalysisRun,
    Report, RunOptions,
};
