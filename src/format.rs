//! Track format descriptors
//!
//! A `MediaFormat` is an opaque key/value bag describing one track (codec,
//! resolution, sample rate, bit rate, ...). Nothing in this crate interprets
//! keys except the strategies that choose to inspect them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::StrategyError;

/// Well-known descriptor keys
pub mod keys {
    pub const CODEC: &str = "codec";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const FRAME_RATE: &str = "frame_rate";
    pub const BIT_RATE: &str = "bit_rate";
    pub const SAMPLE_RATE: &str = "sample_rate";
    pub const CHANNEL_COUNT: &str = "channel_count";
    /// Seconds between key frames
    pub const KEY_FRAME_INTERVAL: &str = "key_frame_interval";
    pub const LANGUAGE: &str = "language";
}

/// Elementary stream kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackType {
    Video,
    Audio,
}

impl TrackType {
    pub const ALL: [TrackType; 2] = [TrackType::Video, TrackType::Audio];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackType::Video => "video",
            TrackType::Audio => "audio",
        }
    }
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single descriptor value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormatValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for FormatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatValue::Int(v) => write!(f, "{}", v),
            FormatValue::Float(v) => write!(f, "{}", v),
            FormatValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for FormatValue {
    fn from(v: i64) -> Self {
        FormatValue::Int(v)
    }
}

impl From<i32> for FormatValue {
    fn from(v: i32) -> Self {
        FormatValue::Int(v as i64)
    }
}

impl From<u32> for FormatValue {
    fn from(v: u32) -> Self {
        FormatValue::Int(v as i64)
    }
}

impl From<u64> for FormatValue {
    fn from(v: u64) -> Self {
        FormatValue::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for FormatValue {
    fn from(v: f64) -> Self {
        FormatValue::Float(v)
    }
}

impl From<f32> for FormatValue {
    fn from(v: f32) -> Self {
        FormatValue::Float(v as f64)
    }
}

impl From<&str> for FormatValue {
    fn from(v: &str) -> Self {
        FormatValue::Text(v.to_string())
    }
}

impl From<String> for FormatValue {
    fn from(v: String) -> Self {
        FormatValue::Text(v)
    }
}

/// Key/value media parameters describing one track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaFormat {
    entries: BTreeMap<String, FormatValue>,
}

impl MediaFormat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: impl Into<FormatValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<FormatValue>) {
        self.entries.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<FormatValue> {
        self.entries.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&FormatValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormatValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(FormatValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Numeric value as float; integers are widened
    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.entries.get(key) {
            Some(FormatValue::Float(v)) => Some(*v),
            Some(FormatValue::Int(v)) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(FormatValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn require_int(&self, key: &str) -> std::result::Result<i64, StrategyError> {
        match self.entries.get(key) {
            Some(FormatValue::Int(v)) => Ok(*v),
            Some(other) => Err(StrategyError::invalid(
                key,
                format!("expected integer, got {:?}", other),
            )),
            None => Err(StrategyError::MissingKey(key.to_string())),
        }
    }

    pub fn require_float(&self, key: &str) -> std::result::Result<f64, StrategyError> {
        match self.entries.get(key) {
            Some(FormatValue::Float(v)) => Ok(*v),
            Some(FormatValue::Int(v)) => Ok(*v as f64),
            Some(other) => Err(StrategyError::invalid(
                key,
                format!("expected number, got {:?}", other),
            )),
            None => Err(StrategyError::MissingKey(key.to_string())),
        }
    }

    pub fn require_str(&self, key: &str) -> std::result::Result<&str, StrategyError> {
        match self.entries.get(key) {
            Some(FormatValue::Text(v)) => Ok(v.as_str()),
            Some(other) => Err(StrategyError::invalid(
                key,
                format!("expected string, got {:?}", other),
            )),
            None => Err(StrategyError::MissingKey(key.to_string())),
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        f.write_str("}")
    }
}

/// One input track discovered in the source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Stream index in the source container
    pub index: usize,
    pub track_type: TrackType,
    pub format: MediaFormat,
}

impl Track {
    pub fn new(index: usize, track_type: TrackType, format: MediaFormat) -> Self {
        Self {
            index,
            track_type,
            format,
        }
    }
}
