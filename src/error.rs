use thiserror::Error;

use crate::format::TrackType;

/// Main error type for track planning
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Strategy failed for {track_type} tracks: {source}")]
    Strategy {
        track_type: TrackType,
        #[source]
        source: StrategyError,
    },

    #[error("No tracks found in input")]
    NoTracks,

    #[error("No output tracks: every track group was removed")]
    NoOutputTracks,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[cfg(feature = "ffmpeg")]
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),
}

/// Raised when a strategy cannot produce a disposition from its inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrategyError {
    #[error("No input formats provided")]
    NoInputs,

    #[error("Missing format key: {0}")]
    MissingKey(String),

    #[error("Invalid value for format key {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Incompatible input formats: {0}")]
    Incompatible(String),
}

impl StrategyError {
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        StrategyError::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PlanError>;
