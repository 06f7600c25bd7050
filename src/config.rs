//! Planner configuration
//!
//! Loads strategy selection and settings from TOML files:
//!
//! ```toml
//! validator = "default"
//!
//! [video]
//! strategy = "default_video"
//! codec = "h264"
//! max_major = 1280
//! max_minor = 720
//!
//! [audio]
//! strategy = "remove"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PlanError, Result, StrategyError};
use crate::format::{MediaFormat, TrackType};
use crate::planner::TrackPlanner;
use crate::resize::{AspectRatioResizer, AtMostResizer, FractionResizer, MultiResizer};
use crate::strategy::audio::DEFAULT_AUDIO_CODEC;
use crate::strategy::video::{DEFAULT_FRAME_RATE, DEFAULT_KEY_FRAME_INTERVAL, DEFAULT_VIDEO_CODEC};
use crate::strategy::{
    AudioChannels, DefaultAudioStrategy, DefaultVideoStrategy, PassThroughTrackStrategy,
    RemoveTrackStrategy, SampleRate, TrackStrategy,
};
use crate::validator::{DefaultValidator, WriteAlwaysValidator};

/// Audio strategy settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioStrategyConfig {
    /// Target codec
    pub codec: String,
    /// Output channels; input channels when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<u32>,
    /// Output sample rate in Hz; input rate when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    /// Bit rate in bps; estimated when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<u64>,
}

impl Default for AudioStrategyConfig {
    fn default() -> Self {
        Self {
            codec: DEFAULT_AUDIO_CODEC.to_string(),
            channels: None,
            sample_rate: None,
            bit_rate: None,
        }
    }
}

/// Video strategy settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoStrategyConfig {
    /// Target codec
    pub codec: String,
    /// Maximum frame rate
    pub frame_rate: u32,
    /// Key frame interval in seconds
    pub key_frame_interval: f64,
    /// Bit rate in bps; estimated when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<u64>,
    /// Crop to this aspect ratio (major / minor)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    /// Scale both sides by this fraction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraction: Option<f64>,
    /// Upper bound for the longer side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_major: Option<u32>,
    /// Upper bound for the shorter side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_minor: Option<u32>,
}

impl Default for VideoStrategyConfig {
    fn default() -> Self {
        Self {
            codec: DEFAULT_VIDEO_CODEC.to_string(),
            frame_rate: DEFAULT_FRAME_RATE,
            key_frame_interval: DEFAULT_KEY_FRAME_INTERVAL,
            bit_rate: None,
            aspect_ratio: None,
            fraction: None,
            max_major: None,
            max_minor: None,
        }
    }
}

/// Strategy selection for one track type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum StrategyConfig {
    Remove,
    PassThrough,
    DefaultAudio(AudioStrategyConfig),
    DefaultVideo(VideoStrategyConfig),
}

impl StrategyConfig {
    /// Construct the configured strategy
    pub fn build(&self) -> Result<Box<dyn TrackStrategy>> {
        let strategy: Box<dyn TrackStrategy> = match self {
            StrategyConfig::Remove => Box::new(RemoveTrackStrategy),
            StrategyConfig::PassThrough => Box::new(PassThroughTrackStrategy),
            StrategyConfig::DefaultAudio(audio) => {
                let mut strategy = DefaultAudioStrategy::new()
                    .codec(audio.codec.as_str())
                    .channels(audio.channels.map_or(AudioChannels::AsInput, AudioChannels::Fixed))
                    .sample_rate(audio.sample_rate.map_or(SampleRate::AsInput, SampleRate::Fixed));
                if let Some(bit_rate) = audio.bit_rate {
                    strategy = strategy.bit_rate(bit_rate);
                }
                Box::new(strategy)
            }
            StrategyConfig::DefaultVideo(video) => {
                if video.frame_rate == 0 {
                    return Err(PlanError::Config("video frame_rate must be positive".into()));
                }
                if !(video.key_frame_interval.is_finite() && video.key_frame_interval > 0.0) {
                    return Err(PlanError::Config(format!(
                        "video key_frame_interval must be positive, got {}",
                        video.key_frame_interval
                    )));
                }
                let mut strategy = DefaultVideoStrategy::new()
                    .codec(video.codec.as_str())
                    .resizer(video.resizer()?)
                    .frame_rate(video.frame_rate)
                    .key_frame_interval(video.key_frame_interval);
                if let Some(bit_rate) = video.bit_rate {
                    strategy = strategy.bit_rate(bit_rate);
                }
                Box::new(strategy)
            }
        };
        Ok(strategy)
    }
}

impl VideoStrategyConfig {
    /// Resizer chain: aspect ratio, then fraction, then upper bounds
    fn resizer(&self) -> Result<MultiResizer> {
        let invalid = |e: StrategyError| PlanError::Config(format!("video resizer: {}", e));
        let mut chain = MultiResizer::new();
        if let Some(ratio) = self.aspect_ratio {
            chain = chain.with(AspectRatioResizer::new(ratio).map_err(invalid)?);
        }
        if let Some(fraction) = self.fraction {
            chain = chain.with(FractionResizer::new(fraction).map_err(invalid)?);
        }
        match (self.max_major, self.max_minor) {
            (Some(major), Some(minor)) => {
                chain = chain.with(AtMostResizer::new(major, minor).map_err(invalid)?);
            }
            (None, None) => {}
            _ => {
                return Err(PlanError::Config(
                    "video max_major and max_minor must be set together".into(),
                ))
            }
        }
        Ok(chain)
    }
}

/// Validator selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorKind {
    #[default]
    Default,
    WriteAlways,
}

/// Output descriptors proposed to each strategy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposedFormats {
    #[serde(skip_serializing_if = "MediaFormat::is_empty")]
    pub video: MediaFormat,
    #[serde(skip_serializing_if = "MediaFormat::is_empty")]
    pub audio: MediaFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub validator: ValidatorKind,
    pub video: StrategyConfig,
    pub audio: StrategyConfig,
    pub proposed: ProposedFormats,
    pub logging: LoggingConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            validator: ValidatorKind::Default,
            video: StrategyConfig::DefaultVideo(VideoStrategyConfig::default()),
            audio: StrategyConfig::DefaultAudio(AudioStrategyConfig::default()),
            proposed: ProposedFormats::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Build a planner with the configured strategies and validator
    pub fn build_planner(&self) -> Result<TrackPlanner> {
        let planner = TrackPlanner::new()
            .strategy(TrackType::Video, self.video.build()?)
            .strategy(TrackType::Audio, self.audio.build()?)
            .proposal(TrackType::Video, self.proposed.video.clone())
            .proposal(TrackType::Audio, self.proposed.audio.clone());

        Ok(match self.validator {
            ValidatorKind::Default => planner.validator(DefaultValidator),
            ValidatorKind::WriteAlways => planner.validator(WriteAlwaysValidator),
        })
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    PlannerConfig::default().to_file(path)
}
