//! Strategy that copies tracks verbatim

use super::{Decision, TrackStrategy};
use crate::error::StrategyError;
use crate::format::MediaFormat;

/// Copies every track of the type without re-encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassThroughTrackStrategy;

impl TrackStrategy for PassThroughTrackStrategy {
    fn decide(
        &self,
        _inputs: &[MediaFormat],
        proposed: MediaFormat,
    ) -> Result<Decision, StrategyError> {
        Ok(Decision::pass_through(proposed))
    }

    fn name(&self) -> &'static str {
        "pass_through"
    }
}
