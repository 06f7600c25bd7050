//! Track strategies for media transcoding
//!
//! Before any samples are processed, a transcoding pipeline has to decide
//! what happens to every track type of its input: drop it, copy it as-is,
//! or re-encode it. This crate provides that decision phase:
//! - `Disposition`: the closed set of outcomes
//! - `TrackStrategy`: the pluggable policy, with remove, pass-through and
//!   default audio/video implementations
//! - `TrackPlanner`: runs one strategy per track type and validates the result

pub mod config;
pub mod disposition;
pub mod error;
pub mod format;
pub mod planner;
#[cfg(feature = "ffmpeg")]
pub mod probe;
pub mod resize;
pub mod strategy;
pub mod validator;

#[cfg(test)]
mod integration;

pub use config::PlannerConfig;
pub use disposition::Disposition;
pub use error::{PlanError, Result, StrategyError};
pub use format::{FormatValue, MediaFormat, Track, TrackType};
pub use planner::{GroupPlan, TrackPlan, TrackPlanner};
pub use strategy::{
    Decision, DefaultAudioStrategy, DefaultVideoStrategy, PassThroughTrackStrategy,
    RemoveTrackStrategy, TrackStrategy,
};
pub use validator::{DefaultValidator, Validator, WriteAlwaysValidator};
