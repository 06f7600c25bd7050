//! Track strategy planner
//!
//! Reads the tracks of a source (a JSON track list, or a media file when
//! built with the `ffmpeg` feature), runs the configured strategies and
//! prints the resulting plan as JSON.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use track_strategy::config::{generate_default_config, LogFormat, LoggingConfig};
use track_strategy::{PlanError, PlannerConfig, Result, Track};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "track-strategy";

/// Config file picked up from the working directory when none is given
const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Parser, Debug, Clone)]
#[command(name = "track-strategy")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Track list (.json) or media file to plan
    #[arg(required_unless_present = "write_default_config")]
    input: Option<PathBuf>,

    /// Planner configuration (TOML); defaults to ./config.toml when present
    config: Option<PathBuf>,

    /// Write the default configuration to PATH and exit
    #[arg(long, value_name = "PATH", conflicts_with_all = ["input", "config"])]
    write_default_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.write_default_config {
        generate_default_config(path)?;
        eprintln!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let (config, config_source) = load_config(args.config.as_deref())?;
    init_logging(&config.logging);

    tracing::info!("{} v{} starting", APP_NAME, VERSION);
    match config_source {
        Some(path) => tracing::info!("Configuration loaded from {}", path.display()),
        None => tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE),
    }

    let input = args
        .input
        .ok_or_else(|| PlanError::Config("no input given".to_string()))?;
    let tracks = load_tracks(&input)?;
    let planner = config.build_planner()?;
    let plan = planner.plan(&tracks)?;

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

/// Load the planner configuration.
///
/// An explicit path must exist and parse. Without one, `config.toml` in the
/// working directory is used when present and defaults apply otherwise.
fn load_config(explicit: Option<&Path>) -> Result<(PlannerConfig, Option<PathBuf>)> {
    let path = match explicit {
        Some(path) if !path.exists() => {
            return Err(PlanError::Config(format!(
                "config file {} not found",
                path.display()
            )));
        }
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                return Ok((PlannerConfig::default(), None));
            }
            path
        }
    };
    let config = PlannerConfig::from_file(&path)?;
    Ok((config, Some(path)))
}

fn load_tracks(path: &Path) -> Result<Vec<Track>> {
    if path.extension().is_some_and(|ext| ext == "json") {
        let content = std::fs::read_to_string(path)?;
        let tracks: Vec<Track> = serde_json::from_str(&content)?;
        tracing::debug!("Loaded {} tracks from {:?}", tracks.len(), path);
        return Ok(tracks);
    }
    probe(path)
}

#[cfg(feature = "ffmpeg")]
fn probe(path: &Path) -> Result<Vec<Track>> {
    track_strategy::probe::probe_file(path)
}

#[cfg(not(feature = "ffmpeg"))]
fn probe(path: &Path) -> Result<Vec<Track>> {
    Err(PlanError::Config(format!(
        "cannot probe {:?}: built without the `ffmpeg` feature, pass a JSON track list",
        path
    )))
}

/// Initialize logging with tracing
fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("track_strategy={}", logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
