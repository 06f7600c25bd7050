//! Track strategies
//!
//! A strategy is invoked once per track-type group and decides whether the
//! group is removed, passed through, or compressed:
//! - `RemoveTrackStrategy` drops the group unconditionally
//! - `PassThroughTrackStrategy` copies the group unconditionally
//! - `DefaultAudioStrategy` / `DefaultVideoStrategy` pass through when the
//!   input already matches the target, and compress otherwise

pub mod audio;
pub mod passthrough;
pub mod remove;
pub mod video;

pub use audio::{AudioChannels, DefaultAudioStrategy, SampleRate};
pub use passthrough::PassThroughTrackStrategy;
pub use remove::RemoveTrackStrategy;
pub use video::DefaultVideoStrategy;

use serde::Serialize;

use crate::disposition::Disposition;
use crate::error::StrategyError;
use crate::format::MediaFormat;

/// Result of a strategy decision: the disposition plus the output descriptor.
///
/// For `Compress` the output is the refined encode target. For the other
/// dispositions it is the proposed descriptor, returned untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    disposition: Disposition,
    output: MediaFormat,
}

impl Decision {
    pub fn remove(proposed: MediaFormat) -> Self {
        Self {
            disposition: Disposition::Remove,
            output: proposed,
        }
    }

    pub fn pass_through(proposed: MediaFormat) -> Self {
        Self {
            disposition: Disposition::PassThrough,
            output: proposed,
        }
    }

    pub fn compress(target: MediaFormat) -> Self {
        Self {
            disposition: Disposition::Compress,
            output: target,
        }
    }

    pub fn disposition(&self) -> Disposition {
        self.disposition
    }

    pub fn output(&self) -> &MediaFormat {
        &self.output
    }

    /// Encode target, only present when compressing
    pub fn target(&self) -> Option<&MediaFormat> {
        match self.disposition {
            Disposition::Compress => Some(&self.output),
            Disposition::Remove | Disposition::PassThrough => None,
        }
    }

    pub fn into_parts(self) -> (Disposition, MediaFormat) {
        (self.disposition, self.output)
    }
}

/// Decision policy for one track type.
///
/// `inputs` holds the descriptors of every input track of the type, in
/// discovery order. Implementations must be pure: no I/O and no logging.
/// A strategy that cannot decide returns an error instead of picking a
/// default disposition.
pub trait TrackStrategy: Send + Sync {
    fn decide(
        &self,
        inputs: &[MediaFormat],
        proposed: MediaFormat,
    ) -> Result<Decision, StrategyError>;

    /// Short name used in logs and plan output
    fn name(&self) -> &'static str;
}

impl<S: TrackStrategy + ?Sized> TrackStrategy for Box<S> {
    fn decide(
        &self,
        inputs: &[MediaFormat],
        proposed: MediaFormat,
    ) -> Result<Decision, StrategyError> {
        (**self).decide(inputs, proposed)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Ensure the group is non-empty before inspecting it
pub(crate) fn require_inputs(inputs: &[MediaFormat]) -> Result<&MediaFormat, StrategyError> {
    inputs.first().ok_or(StrategyError::NoInputs)
}
