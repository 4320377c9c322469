//! Possession CLI
//!
//! Tracking frames (CSV / JSON) + YAML config → possession report

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use possession_core::AnalyzerConfig;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "possession")]
#[command(about = "Ball possession analysis from tracking data", long_about = None)]
struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Detect possession episodes and summarize them
    Analyze {
        /// YAML configuration file
        #[arg(long)]
        config: PathBuf,

        /// Tracking frames (.csv long format or .json)
        #[arg(long)]
        frames: PathBuf,

        /// Only summarize events within this many seconds of the last one
        #[arg(long)]
        window: Option<f64>,

        /// Close the episode still open at end of input
        #[arg(long, default_value = "false")]
        flush: bool,

        /// Write the JSON report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Write per-frame results as JSON lines
        #[arg(long)]
        per_frame: Option<PathBuf>,
    },

    /// Print the possession timeline of the last N episodes
    Flow {
        /// YAML configuration file
        #[arg(long)]
        config: PathBuf,

        /// Tracking frames (.csv long format or .json)
        #[arg(long)]
        frames: PathBuf,

        /// Number of most recent episodes
        #[arg(long, default_value = "20")]
        last: usize,

        /// Close the episode still open at end of input
        #[arg(long, default_value = "false")]
        flush: bool,
    },

    /// Validate a configuration file
    CheckConfig {
        /// YAML configuration file
        #[arg(long)]
        config: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose {
        "possession_core=debug,possession_cli=debug"
    } else {
        "possession_core=info,possession_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn load_config(path: &Path) -> Result<AnalyzerConfig> {
    AnalyzerConfig::load(path)
        .with_context(|| format!("Failed to load config: {}", path.display()))
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze {
            config,
            frames,
            window,
            flush,
            out,
            per_frame,
        } => {
            let config = load_config(&config)?;
            let frames = possession_cli::read_frames(&frames)?;
            let run = possession_cli::analyze_frames(
                config,
                &frames,
                possession_cli::RunOptions {
                    time_window: window,
                    flush,
                },
            );

            eprint!("{}", possession_cli::format_summary(run.report.summary.as_ref()));
            eprintln!();

            if let Some(path) = per_frame {
                possession_cli::write_frame_results(&path, &run.frame_results)?;
                tracing::info!(path = %path.display(), "per-frame results written");
            }

            match out {
                Some(path) => {
                    possession_cli::write_json(&path, &run.report)?;
                    tracing::info!(path = %path.display(), "report written");
                }
                None => println!("{}", serde_json::to_string_pretty(&run.report)?),
            }
        }

        Commands::Flow {
            config,
            frames,
            last,
            flush,
        } => {
            let config = load_config(&config)?;
            let frames = possession_cli::read_frames(&frames)?;
            let segments = possession_cli::flow_segments(config, &frames, last, flush);
            if segments.is_empty() {
                println!("No possession data");
            }
            for seg in segments {
                let label = seg.team.map_or("none", |t| t.as_str());
                println!("{:>9.2}  {:>9.2}  {}", seg.start, seg.end, label);
            }
        }

        Commands::CheckConfig { config } => {
            let cfg = load_config(&config)?;
            println!("✅ Config OK: {}", config.display());
            println!("   Frame rate:     {} Hz", cfg.frame_rate);
            println!("   Field:          {} x {} m", cfg.field.length, cfg.field.width);
            println!("   Control radius: {} m", cfg.control_radius());
            println!("   Min duration:   {} s", cfg.min_possession_duration());
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("possession CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
