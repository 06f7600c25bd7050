//! Default audio strategy - normalizes audio groups to a single target codec

use serde::{Deserialize, Serialize};

use super::{require_inputs, Decision, TrackStrategy};
use crate::error::StrategyError;
use crate::format::{keys, MediaFormat};

/// Highest channel count the output may carry
pub const MAX_AUDIO_CHANNELS: i64 = 8;

/// Default target codec
pub const DEFAULT_AUDIO_CODEC: &str = "aac";

/// Output channel policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioChannels {
    /// Largest channel count among the inputs
    #[default]
    AsInput,
    Fixed(u32),
}

/// Output sample rate policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleRate {
    /// Lowest sample rate among the inputs
    #[default]
    AsInput,
    Fixed(u32),
}

/// Audio strategy that passes a single matching input through and compresses
/// everything else to `codec`.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultAudioStrategy {
    codec: String,
    channels: AudioChannels,
    sample_rate: SampleRate,
    bit_rate: Option<u64>,
}

impl Default for DefaultAudioStrategy {
    fn default() -> Self {
        Self {
            codec: DEFAULT_AUDIO_CODEC.to_string(),
            channels: AudioChannels::AsInput,
            sample_rate: SampleRate::AsInput,
            bit_rate: None,
        }
    }
}

impl DefaultAudioStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = codec.into();
        self
    }

    pub fn channels(mut self, channels: AudioChannels) -> Self {
        self.channels = channels;
        self
    }

    pub fn sample_rate(mut self, sample_rate: SampleRate) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Target bit rate in bps; estimated from channels and rate when unset
    pub fn bit_rate(mut self, bit_rate: u64) -> Self {
        self.bit_rate = Some(bit_rate);
        self
    }

    fn output_channels(&self, inputs: &[MediaFormat]) -> Result<u32, StrategyError> {
        let channels = match self.channels {
            AudioChannels::Fixed(n) => n as i64,
            AudioChannels::AsInput => {
                let mut max = 0;
                for input in inputs {
                    max = max.max(input.require_int(keys::CHANNEL_COUNT)?);
                }
                max
            }
        };
        if !(1..=MAX_AUDIO_CHANNELS).contains(&channels) {
            return Err(StrategyError::invalid(
                keys::CHANNEL_COUNT,
                format!("{} is outside 1..={}", channels, MAX_AUDIO_CHANNELS),
            ));
        }
        Ok(channels as u32)
    }

    fn output_sample_rate(&self, inputs: &[MediaFormat]) -> Result<u32, StrategyError> {
        let rate = match self.sample_rate {
            SampleRate::Fixed(hz) => hz as i64,
            SampleRate::AsInput => {
                let mut min = i64::MAX;
                for input in inputs {
                    min = min.min(input.require_int(keys::SAMPLE_RATE)?);
                }
                min
            }
        };
        u32::try_from(rate)
            .ok()
            .filter(|&hz| hz > 0)
            .ok_or_else(|| {
                StrategyError::invalid(keys::SAMPLE_RATE, format!("{} is not a valid rate", rate))
            })
    }

    fn can_pass_through(&self, inputs: &[MediaFormat], channels: u32, sample_rate: u32) -> bool {
        let [input] = inputs else {
            return false;
        };
        let bit_rate_ok = match self.bit_rate {
            Some(target) => input
                .get_int(keys::BIT_RATE)
                .is_some_and(|b| b > 0 && b as u64 <= target),
            None => true,
        };
        input.get_str(keys::CODEC) == Some(self.codec.as_str())
            && input.get_int(keys::CHANNEL_COUNT) == Some(channels as i64)
            && input.get_int(keys::SAMPLE_RATE) == Some(sample_rate as i64)
            && bit_rate_ok
    }
}

impl TrackStrategy for DefaultAudioStrategy {
    fn decide(
        &self,
        inputs: &[MediaFormat],
        proposed: MediaFormat,
    ) -> Result<Decision, StrategyError> {
        require_inputs(inputs)?;
        let channels = self.output_channels(inputs)?;
        let sample_rate = self.output_sample_rate(inputs)?;

        if self.can_pass_through(inputs, channels, sample_rate) {
            return Ok(Decision::pass_through(proposed));
        }

        let bit_rate = self
            .bit_rate
            .unwrap_or_else(|| estimate_audio_bit_rate(channels, sample_rate));

        let target = proposed
            .with(keys::CODEC, self.codec.as_str())
            .with(keys::CHANNEL_COUNT, channels)
            .with(keys::SAMPLE_RATE, sample_rate)
            .with(keys::BIT_RATE, bit_rate);
        Ok(Decision::compress(target))
    }

    fn name(&self) -> &'static str {
        "default_audio"
    }
}

/// Estimate a compressed bit rate: 16-bit PCM at a 12:1 compression ratio
pub fn estimate_audio_bit_rate(channels: u32, sample_rate: u32) -> u64 {
    let pcm = 16 * sample_rate as u64 * channels as u64;
    pcm / 12
}
