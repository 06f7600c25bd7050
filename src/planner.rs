//! Track planner - runs the configured strategy once per track type
//!
//! The planner is the pipeline-side half of the decision phase:
//! - Groups input tracks by type, keeping discovery order
//! - Invokes each type's strategy exactly once, skipping absent types
//! - Aborts the whole plan on the first strategy error
//! - Asks the validator whether an output has to be written at all

use serde::Serialize;

use crate::disposition::Disposition;
use crate::error::{PlanError, Result};
use crate::format::{MediaFormat, Track, TrackType};
use crate::strategy::{Decision, DefaultAudioStrategy, DefaultVideoStrategy, TrackStrategy};
use crate::validator::{DefaultValidator, Validator};

/// Decision for one track type
#[derive(Debug, Clone, Serialize)]
pub struct GroupPlan {
    pub track_type: TrackType,
    /// Name of the strategy that decided
    pub strategy: &'static str,
    /// Source stream indices of the group, in discovery order
    pub track_indices: Vec<usize>,
    pub decision: Decision,
}

/// Immutable result of one decision phase
#[derive(Debug, Clone, Serialize)]
pub struct TrackPlan {
    groups: Vec<GroupPlan>,
    transcode_needed: bool,
}

impl TrackPlan {
    pub fn groups(&self) -> &[GroupPlan] {
        &self.groups
    }

    pub fn group(&self, track_type: TrackType) -> Option<&GroupPlan> {
        self.groups.iter().find(|g| g.track_type == track_type)
    }

    pub fn decision(&self, track_type: TrackType) -> Option<&Decision> {
        self.group(track_type).map(|g| &g.decision)
    }

    /// `None` when the source has no tracks of this type
    pub fn disposition(&self, track_type: TrackType) -> Option<Disposition> {
        self.decision(track_type).map(|d| d.disposition())
    }

    pub fn track_indices(&self, track_type: TrackType) -> &[usize] {
        self.group(track_type)
            .map(|g| g.track_indices.as_slice())
            .unwrap_or(&[])
    }

    /// Each kept group produces exactly one output track
    pub fn output_track_count(&self) -> usize {
        self.groups
            .iter()
            .filter(|g| g.decision.disposition().writes_output())
            .count()
    }

    /// False when the validator found the source usable as-is
    pub fn transcode_needed(&self) -> bool {
        self.transcode_needed
    }
}

/// Holds one strategy per track type plus the validator
pub struct TrackPlanner {
    video: Box<dyn TrackStrategy>,
    audio: Box<dyn TrackStrategy>,
    video_proposal: MediaFormat,
    audio_proposal: MediaFormat,
    validator: Box<dyn Validator>,
}

impl Default for TrackPlanner {
    fn default() -> Self {
        Self {
            video: Box::new(DefaultVideoStrategy::new()),
            audio: Box::new(DefaultAudioStrategy::new()),
            video_proposal: MediaFormat::new(),
            audio_proposal: MediaFormat::new(),
            validator: Box::new(DefaultValidator),
        }
    }
}

impl TrackPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn video_strategy(self, strategy: impl TrackStrategy + 'static) -> Self {
        self.strategy(TrackType::Video, Box::new(strategy))
    }

    pub fn audio_strategy(self, strategy: impl TrackStrategy + 'static) -> Self {
        self.strategy(TrackType::Audio, Box::new(strategy))
    }

    pub fn strategy(mut self, track_type: TrackType, strategy: Box<dyn TrackStrategy>) -> Self {
        match track_type {
            TrackType::Video => self.video = strategy,
            TrackType::Audio => self.audio = strategy,
        }
        self
    }

    /// Output descriptor proposed to the strategy of `track_type`
    pub fn proposal(mut self, track_type: TrackType, proposed: MediaFormat) -> Self {
        match track_type {
            TrackType::Video => self.video_proposal = proposed,
            TrackType::Audio => self.audio_proposal = proposed,
        }
        self
    }

    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    fn strategy_for(&self, track_type: TrackType) -> &dyn TrackStrategy {
        match track_type {
            TrackType::Video => self.video.as_ref(),
            TrackType::Audio => self.audio.as_ref(),
        }
    }

    fn proposal_for(&self, track_type: TrackType) -> &MediaFormat {
        match track_type {
            TrackType::Video => &self.video_proposal,
            TrackType::Audio => &self.audio_proposal,
        }
    }

    /// Run the decision phase for one transcode run
    pub fn plan(&self, tracks: &[Track]) -> Result<TrackPlan> {
        if tracks.is_empty() {
            return Err(PlanError::NoTracks);
        }

        let mut groups = Vec::new();
        for track_type in TrackType::ALL {
            let group: Vec<&Track> = tracks
                .iter()
                .filter(|t| t.track_type == track_type)
                .collect();
            if group.is_empty() {
                tracing::debug!("No {} tracks, skipping strategy", track_type);
                continue;
            }

            let strategy = self.strategy_for(track_type);
            let inputs: Vec<MediaFormat> = group.iter().map(|t| t.format.clone()).collect();
            let decision = strategy
                .decide(&inputs, self.proposal_for(track_type).clone())
                .map_err(|source| {
                    tracing::error!(
                        "Strategy {} failed for {} tracks: {}",
                        strategy.name(),
                        track_type,
                        source
                    );
                    PlanError::Strategy { track_type, source }
                })?;

            tracing::debug!(
                "{} tracks {:?}: {} -> {} (output {})",
                track_type,
                group.iter().map(|t| t.index).collect::<Vec<_>>(),
                strategy.name(),
                decision.disposition(),
                decision.output()
            );

            groups.push(GroupPlan {
                track_type,
                strategy: strategy.name(),
                track_indices: group.iter().map(|t| t.index).collect(),
                decision,
            });
        }

        if groups
            .iter()
            .all(|g| g.decision.disposition().is_removing())
        {
            tracing::warn!("Every track group was removed, nothing to write");
            return Err(PlanError::NoOutputTracks);
        }

        let disposition = |t: TrackType| {
            groups
                .iter()
                .find(|g| g.track_type == t)
                .map(|g| g.decision.disposition())
        };
        let transcode_needed = self.validator.validate(
            disposition(TrackType::Video),
            disposition(TrackType::Audio),
        );

        tracing::info!(
            "Planned {} track groups: video={:?}, audio={:?}, transcode_needed={} (validator {})",
            groups.len(),
            disposition(TrackType::Video),
            disposition(TrackType::Audio),
            transcode_needed,
            self.validator.name()
        );

        Ok(TrackPlan {
            groups,
            transcode_needed,
        })
    }
}
