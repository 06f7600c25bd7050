//! Strategy that removes the whole track type from the output

use super::{Decision, TrackStrategy};
use crate::error::StrategyError;
use crate::format::MediaFormat;

/// Drops every track of the type it is configured for, e.g. to strip all
/// audio. Never inspects its inputs and never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveTrackStrategy;

impl TrackStrategy for RemoveTrackStrategy {
    fn decide(
        &self,
        _inputs: &[MediaFormat],
        proposed: MediaFormat,
    ) -> Result<Decision, StrategyError> {
        Ok(Decision::remove(proposed))
    }

    fn name(&self) -> &'static str {
        "remove"
    }
}
