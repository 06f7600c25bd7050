//! Default video strategy - resizes and re-encodes unless the input already
//! satisfies every target constraint

use super::{require_inputs, Decision, TrackStrategy};
use crate::error::StrategyError;
use crate::format::{keys, MediaFormat};
use crate::resize::{PassThroughResizer, Resizer, Size};

/// Default target codec
pub const DEFAULT_VIDEO_CODEC: &str = "h264";
/// Default target frame rate
pub const DEFAULT_FRAME_RATE: u32 = 30;
/// Default key frame interval in seconds
pub const DEFAULT_KEY_FRAME_INTERVAL: f64 = 3.0;

/// Video strategy configured with a target codec, size policy, frame rate,
/// bit rate and key frame interval.
#[derive(Debug)]
pub struct DefaultVideoStrategy {
    codec: String,
    resizer: Box<dyn Resizer>,
    frame_rate: u32,
    bit_rate: Option<u64>,
    key_frame_interval: f64,
}

impl Default for DefaultVideoStrategy {
    fn default() -> Self {
        Self {
            codec: DEFAULT_VIDEO_CODEC.to_string(),
            resizer: Box::new(PassThroughResizer),
            frame_rate: DEFAULT_FRAME_RATE,
            bit_rate: None,
            key_frame_interval: DEFAULT_KEY_FRAME_INTERVAL,
        }
    }
}

impl DefaultVideoStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = codec.into();
        self
    }

    pub fn resizer(mut self, resizer: impl Resizer + 'static) -> Self {
        self.resizer = Box::new(resizer);
        self
    }

    pub fn frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Target bit rate in bps; estimated from size and frame rate when unset
    pub fn bit_rate(mut self, bit_rate: u64) -> Self {
        self.bit_rate = Some(bit_rate);
        self
    }

    pub fn key_frame_interval(mut self, seconds: f64) -> Self {
        self.key_frame_interval = seconds;
        self
    }

    /// Size of the first input; every other input must share its orientation
    fn input_size(&self, inputs: &[MediaFormat]) -> Result<Size, StrategyError> {
        let mut reference: Option<Size> = None;
        for input in inputs {
            let size = read_size(input)?;
            match reference {
                None => reference = Some(size),
                Some(first) if first.is_portrait() != size.is_portrait() => {
                    return Err(StrategyError::Incompatible(format!(
                        "mixed orientations: {}x{} and {}x{}",
                        first.width, first.height, size.width, size.height
                    )));
                }
                Some(_) => {}
            }
        }
        reference.ok_or(StrategyError::NoInputs)
    }

    /// Lowest frame rate declared by any input, if any declares one
    fn input_frame_rate(&self, inputs: &[MediaFormat]) -> Result<Option<f64>, StrategyError> {
        let mut min: Option<f64> = None;
        for input in inputs {
            if !input.contains(keys::FRAME_RATE) {
                continue;
            }
            let rate = input.require_float(keys::FRAME_RATE)?;
            if !(rate.is_finite() && rate > 0.0) {
                return Err(StrategyError::invalid(
                    keys::FRAME_RATE,
                    format!("{} is not a positive rate", rate),
                ));
            }
            min = Some(min.map_or(rate, |m: f64| m.min(rate)));
        }
        Ok(min)
    }
}

impl TrackStrategy for DefaultVideoStrategy {
    fn decide(
        &self,
        inputs: &[MediaFormat],
        proposed: MediaFormat,
    ) -> Result<Decision, StrategyError> {
        let first = require_inputs(inputs)?;
        if self.frame_rate == 0 {
            return Err(StrategyError::invalid(keys::FRAME_RATE, "target is zero"));
        }
        if !(self.key_frame_interval.is_finite() && self.key_frame_interval > 0.0) {
            return Err(StrategyError::invalid(
                keys::KEY_FRAME_INTERVAL,
                format!("target {} is not a positive interval", self.key_frame_interval),
            ));
        }

        let input_size = self.input_size(inputs)?;
        let output_size = self.resizer.resize(input_size)?;
        let input_frame_rate = self.input_frame_rate(inputs)?;
        let target_frame_rate = self.frame_rate as f64;

        let single = inputs.len() == 1;
        let codec_done = single && first.get_str(keys::CODEC) == Some(self.codec.as_str());
        let size_done = single && output_size == input_size;
        let frame_rate_done = input_frame_rate.map_or(true, |rate| rate <= target_frame_rate);
        let key_frame_done = single
            && first
                .get_float(keys::KEY_FRAME_INTERVAL)
                .map_or(true, |interval| interval >= self.key_frame_interval);
        let bit_rate_done = match self.bit_rate {
            Some(target) => first
                .get_int(keys::BIT_RATE)
                .is_some_and(|b| b > 0 && b as u64 <= target),
            None => true,
        };

        if codec_done && size_done && frame_rate_done && key_frame_done && bit_rate_done {
            return Ok(Decision::pass_through(proposed));
        }

        let output_size = output_size.aligned(2);
        let output_frame_rate =
            input_frame_rate.map_or(target_frame_rate, |rate| rate.min(target_frame_rate));
        let bit_rate = self.bit_rate.unwrap_or_else(|| {
            estimate_video_bit_rate(output_size.width, output_size.height, output_frame_rate)
        });

        let target = proposed
            .with(keys::CODEC, self.codec.as_str())
            .with(keys::WIDTH, output_size.width)
            .with(keys::HEIGHT, output_size.height)
            .with(keys::FRAME_RATE, output_frame_rate)
            .with(keys::BIT_RATE, bit_rate)
            .with(keys::KEY_FRAME_INTERVAL, self.key_frame_interval);
        Ok(Decision::compress(target))
    }

    fn name(&self) -> &'static str {
        "default_video"
    }
}

fn read_size(format: &MediaFormat) -> Result<Size, StrategyError> {
    let width = format.require_int(keys::WIDTH)?;
    let height = format.require_int(keys::HEIGHT)?;
    let side = |key: &str, v: i64| {
        u32::try_from(v)
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| StrategyError::invalid(key, format!("{} is not a valid dimension", v)))
    };
    Ok(Size::new(side(keys::WIDTH, width)?, side(keys::HEIGHT, height)?))
}

/// Estimate a bit rate from pixel throughput (0.07 bits per pixel, doubled)
pub fn estimate_video_bit_rate(width: u32, height: u32, frame_rate: f64) -> u64 {
    (0.07 * 2.0 * width as f64 * height as f64 * frame_rate).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disposition::Disposition;
    use crate::resize::{AtMostResizer, FractionResizer};

    fn video(codec: &str, width: i64, height: i64) -> MediaFormat {
        MediaFormat::new()
            .with(keys::CODEC, codec)
            .with(keys::WIDTH, width)
            .with(keys::HEIGHT, height)
    }

    #[test]
    fn test_matching_h264_passes_through() {
        let inputs = vec![video("h264", 1280, 720).with(keys::FRAME_RATE, 25.0)];
        let decision = DefaultVideoStrategy::new()
            .decide(&inputs, MediaFormat::new())
            .unwrap();
        assert_eq!(decision.disposition(), Disposition::PassThrough);
    }

    #[test]
    fn test_codec_change_compresses() {
        let inputs = vec![video("h264", 1920, 1080).with(keys::FRAME_RATE, 24.0)];
        let decision = DefaultVideoStrategy::new()
            .codec("h265")
            .resizer(AtMostResizer::new(1280, 720).unwrap())
            .decide(&inputs, MediaFormat::new())
            .unwrap();

        assert_eq!(decision.disposition(), Disposition::Compress);
        let target = decision.target().unwrap();
        assert_eq!(target.get_str(keys::CODEC), Some("h265"));
        assert_eq!(target.get_int(keys::WIDTH), Some(1280));
        assert_eq!(target.get_int(keys::HEIGHT), Some(720));
        assert_eq!(target.get_float(keys::FRAME_RATE), Some(24.0));
        assert_eq!(target.get_float(keys::KEY_FRAME_INTERVAL), Some(3.0));
    }

    #[test]
    fn test_high_frame_rate_is_clamped() {
        let inputs = vec![video("h264", 1280, 720).with(keys::FRAME_RATE, 60.0)];
        let decision = DefaultVideoStrategy::new()
            .decide(&inputs, MediaFormat::new())
            .unwrap();
        assert_eq!(decision.disposition(), Disposition::Compress);
        assert_eq!(decision.output().get_float(keys::FRAME_RATE), Some(30.0));
        assert_eq!(
            decision.output().get_int(keys::BIT_RATE),
            Some(estimate_video_bit_rate(1280, 720, 30.0) as i64)
        );
    }

    #[test]
    fn test_resize_forces_compress_and_aligns() {
        let inputs = vec![video("h264", 1918, 1078)];
        let decision = DefaultVideoStrategy::new()
            .resizer(FractionResizer::new(0.5).unwrap())
            .decide(&inputs, MediaFormat::new())
            .unwrap();
        assert_eq!(decision.disposition(), Disposition::Compress);
        assert_eq!(decision.output().get_int(keys::WIDTH), Some(958));
        assert_eq!(decision.output().get_int(keys::HEIGHT), Some(538));
    }

    #[test]
    fn test_short_key_frame_interval_compresses() {
        let inputs = vec![video("h264", 640, 360).with(keys::KEY_FRAME_INTERVAL, 1.0)];
        let decision = DefaultVideoStrategy::new()
            .decide(&inputs, MediaFormat::new())
            .unwrap();
        assert_eq!(decision.disposition(), Disposition::Compress);
    }

    #[test]
    fn test_bit_rate_cap_forces_compress() {
        let strategy = DefaultVideoStrategy::new().bit_rate(2_000_000);

        let inputs = vec![video("h264", 1280, 720).with(keys::BIT_RATE, 5_000_000)];
        let decision = strategy.decide(&inputs, MediaFormat::new()).unwrap();
        assert_eq!(decision.disposition(), Disposition::Compress);
        assert_eq!(decision.output().get_int(keys::BIT_RATE), Some(2_000_000));

        let inputs = vec![video("h264", 1280, 720).with(keys::BIT_RATE, 2_000_000)];
        let decision = strategy.decide(&inputs, MediaFormat::new()).unwrap();
        assert_eq!(decision.disposition(), Disposition::PassThrough);

        // Unknown input bit rate cannot be shown to respect the cap
        let inputs = vec![video("h264", 1280, 720)];
        let decision = strategy.decide(&inputs, MediaFormat::new()).unwrap();
        assert_eq!(decision.disposition(), Disposition::Compress);
        assert_eq!(decision.output().get_int(keys::BIT_RATE), Some(2_000_000));
    }

    #[test]
    fn test_invalid_key_frame_interval() {
        let inputs = vec![video("h264", 1280, 720)];
        for interval in [0.0, -1.0, f64::NAN] {
            let err = DefaultVideoStrategy::new()
                .key_frame_interval(interval)
                .decide(&inputs, MediaFormat::new())
                .unwrap_err();
            assert!(matches!(
                err,
                StrategyError::InvalidValue { ref key, .. } if key == "key_frame_interval"
            ));
        }
    }

    #[test]
    fn test_multiple_inputs_always_compress() {
        let inputs = vec![video("h264", 1280, 720), video("h264", 1280, 720)];
        let decision = DefaultVideoStrategy::new()
            .decide(&inputs, MediaFormat::new())
            .unwrap();
        assert_eq!(decision.disposition(), Disposition::Compress);
    }

    #[test]
    fn test_mixed_orientation_is_incompatible() {
        let inputs = vec![video("h264", 1280, 720), video("h264", 720, 1280)];
        let err = DefaultVideoStrategy::new()
            .decide(&inputs, MediaFormat::new())
            .unwrap_err();
        assert!(matches!(err, StrategyError::Incompatible(_)));
    }

    #[test]
    fn test_malformed_descriptors() {
        let missing = vec![MediaFormat::new().with(keys::CODEC, "h264")];
        assert_eq!(
            DefaultVideoStrategy::new().decide(&missing, MediaFormat::new()),
            Err(StrategyError::MissingKey("width".into()))
        );

        let negative = vec![video("h264", -1, 720)];
        assert!(matches!(
            DefaultVideoStrategy::new().decide(&negative, MediaFormat::new()),
            Err(StrategyError::InvalidValue { .. })
        ));

        let bad_rate = vec![video("h264", 1280, 720).with(keys::FRAME_RATE, "fast")];
        assert!(matches!(
            DefaultVideoStrategy::new().decide(&bad_rate, MediaFormat::new()),
            Err(StrategyError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(
            DefaultVideoStrategy::new().decide(&[], MediaFormat::new()),
            Err(StrategyError::NoInputs)
        );
    }

    #[test]
    fn test_estimate_video_bit_rate() {
        assert_eq!(estimate_video_bit_rate(1280, 720, 30.0), 3_870_720);
    }
}
