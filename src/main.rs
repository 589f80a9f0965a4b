// src/main.rs
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{info, warn};

use posture_coach::{
    evaluate, evaluate_side, AnalysisResult, LandmarkPoint, LandmarkSet, Mode, Side,
    ThresholdConfig,
};

#[derive(Parser)]
#[command(name = "posture-coach")]
#[command(about = "Posture feedback from pose landmarks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a landmark file and print feedback as JSON
    Analyze {
        /// squat, desk, pushup, lunge or yoga_tpose
        #[arg(long, short)]
        mode: String,

        /// Landmark JSON file, or "-" for stdin
        #[arg(long, short, default_value = "-")]
        input: PathBuf,

        /// JSON file with threshold overrides
        #[arg(long, short)]
        thresholds: Option<PathBuf>,

        /// Only check one side of the body
        #[arg(long)]
        side: Option<Side>,

        /// Print messages without confidence
        #[arg(long)]
        messages_only: bool,
    },

    /// List supported modes
    Modes,

    /// Print the default thresholds
    Defaults,
}

/// Accepts `{"landmarks": [...]}` as produced by the pose endpoint, or a bare array.
fn parse_landmarks(raw: &str) -> Result<LandmarkSet> {
    let document: Value = serde_json::from_str(raw).context("Input is not valid JSON")?;
    let points = match document {
        Value::Object(mut map) => map
            .remove("landmarks")
            .ok_or_else(|| anyhow!("Input object has no \"landmarks\" field"))?,
        other => other,
    };
    let points: Vec<LandmarkPoint> = serde_json::from_value(points)
        .context("Landmarks must be an array of {x, y, z, visibility} points")?;
    Ok(LandmarkSet::from_points(points)?)
}

fn run_analysis(
    landmarks: &LandmarkSet,
    mode: &str,
    config: &ThresholdConfig,
    side: Option<Side>,
) -> AnalysisResult {
    match (side, mode.parse::<Mode>()) {
        (Some(side), Ok(mode)) => {
            if !mode.is_bilateral() {
                warn!("{} always checks both arms; ignoring --side", mode);
            }
            evaluate_side(landmarks, mode, side, config)
        }
        _ => evaluate(landmarks, mode, config),
    }
}

fn render(result: &AnalysisResult, messages_only: bool) -> Result<String> {
    let output = if messages_only {
        serde_json::to_string_pretty(&result.messages())?
    } else {
        serde_json::to_string_pretty(result)?
    };
    Ok(output)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read landmarks from stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read landmarks from {}", path.display()))
    }
}

fn analyze(
    mode: &str,
    input: &Path,
    thresholds: Option<&Path>,
    side: Option<Side>,
    messages_only: bool,
) -> Result<()> {
    let raw = read_input(input)?;
    let landmarks = parse_landmarks(&raw)
        .with_context(|| format!("Invalid landmark input from {}", input.display()))?;
    info!("Loaded {} landmarks from {}", landmarks.points().len(), input.display());

    let config = match thresholds {
        Some(path) => ThresholdConfig::from_json_file(path)
            .with_context(|| format!("Failed to load thresholds from {}", path.display()))?,
        None => ThresholdConfig::default(),
    };

    let result = run_analysis(&landmarks, mode, &config, side);
    info!("{} feedback item(s) for mode '{}'", result.len(), mode);

    println!("{}", render(&result, messages_only)?);
    Ok(())
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            mode,
            input,
            thresholds,
            side,
            messages_only,
        } => analyze(&mode, &input, thresholds.as_deref(), side, messages_only)?,
        Commands::Modes => {
            for mode in Mode::ALL {
                println!("{:<12} {}", mode.as_str(), mode.label());
            }
        }
        Commands::Defaults => {
            println!("{}", serde_json::to_string_pretty(&ThresholdConfig::default())?);
        }
    }

    Ok(())
}
