//! End-to-end integration tests

use crate::config::{PlannerConfig, StrategyConfig, VideoStrategyConfig};
use crate::disposition::Disposition;
use crate::error::{PlanError, StrategyError};
use crate::format::{keys, MediaFormat, TrackType};
use crate::integration::fixtures::TestMediaInfo;
use crate::strategy::{RemoveTrackStrategy, TrackStrategy};

fn remove_audio_config() -> PlannerConfig {
    PlannerConfig {
        audio: StrategyConfig::Remove,
        ..Default::default()
    }
}

#[test]
fn test_matching_source_needs_no_transcode() {
    let fixture = TestMediaInfo::h264_aac();
    let plan = PlannerConfig::default()
        .build_planner()
        .unwrap()
        .plan(&fixture.tracks)
        .unwrap();

    assert_eq!(plan.disposition(TrackType::Video), Some(Disposition::PassThrough));
    assert_eq!(plan.disposition(TrackType::Audio), Some(Disposition::PassThrough));
    assert_eq!(plan.output_track_count(), 2);
    assert!(!plan.transcode_needed());
}

#[test]
fn test_downscale_to_720p() {
    let config = PlannerConfig {
        video: StrategyConfig::DefaultVideo(VideoStrategyConfig {
            max_major: Some(1280),
            max_minor: Some(720),
            ..Default::default()
        }),
        ..Default::default()
    };
    let plan = config
        .build_planner()
        .unwrap()
        .plan(&TestMediaInfo::h264_aac().tracks)
        .unwrap();

    let video = plan.decision(TrackType::Video).unwrap();
    assert_eq!(video.disposition(), Disposition::Compress);
    let target = video.target().unwrap();
    assert_eq!(target.get_int(keys::WIDTH), Some(1280));
    assert_eq!(target.get_int(keys::HEIGHT), Some(720));
    assert_eq!(target.get_float(keys::FRAME_RATE), Some(24.0));
    assert_eq!(plan.disposition(TrackType::Audio), Some(Disposition::PassThrough));
    assert!(plan.transcode_needed());

    // Already 720p: nothing to do
    let plan = config
        .build_planner()
        .unwrap()
        .plan(&TestMediaInfo::h264_aac_720p().tracks)
        .unwrap();
    assert!(!plan.transcode_needed());
}

#[test]
fn test_strip_audio() {
    let plan = remove_audio_config()
        .build_planner()
        .unwrap()
        .plan(&TestMediaInfo::h264_aac().tracks)
        .unwrap();

    assert_eq!(plan.disposition(TrackType::Audio), Some(Disposition::Remove));
    assert_eq!(plan.track_indices(TrackType::Audio), &[1]);
    assert_eq!(plan.output_track_count(), 1);
    assert!(plan.transcode_needed());
}

#[test]
fn test_strip_audio_from_audio_only_source() {
    let result = remove_audio_config()
        .build_planner()
        .unwrap()
        .plan(&TestMediaInfo::two_audio_only().tracks);
    assert!(matches!(result, Err(PlanError::NoOutputTracks)));
}

#[test]
fn test_multiple_audio_tracks_are_merged() {
    let plan = PlannerConfig::default()
        .build_planner()
        .unwrap()
        .plan(&TestMediaInfo::hevc_ac3_commentary().tracks)
        .unwrap();

    let video = plan.decision(TrackType::Video).unwrap();
    assert_eq!(video.disposition(), Disposition::Compress);
    assert_eq!(video.output().get_str(keys::CODEC), Some("h264"));

    let audio = plan.decision(TrackType::Audio).unwrap();
    assert_eq!(audio.disposition(), Disposition::Compress);
    assert_eq!(audio.output().get_int(keys::CHANNEL_COUNT), Some(6));
    assert_eq!(audio.output().get_int(keys::SAMPLE_RATE), Some(44100));
    assert_eq!(plan.track_indices(TrackType::Audio), &[1, 2]);
}

#[test]
fn test_audio_only_source() {
    let plan = PlannerConfig::default()
        .build_planner()
        .unwrap()
        .plan(&TestMediaInfo::two_audio_only().tracks)
        .unwrap();

    assert_eq!(plan.disposition(TrackType::Video), None);
    assert_eq!(plan.disposition(TrackType::Audio), Some(Disposition::Compress));
    assert_eq!(plan.output_track_count(), 1);
}

#[test]
fn test_malformed_descriptor_aborts_before_encoding() {
    let result = PlannerConfig::default()
        .build_planner()
        .unwrap()
        .plan(&TestMediaInfo::broken_video().tracks);

    match result {
        Err(PlanError::Strategy { track_type, source }) => {
            assert_eq!(track_type, TrackType::Video);
            assert_eq!(source, StrategyError::MissingKey(keys::WIDTH.to_string()));
        }
        other => panic!("expected strategy error, got {:?}", other),
    }
}

#[test]
fn test_remove_strategy_on_every_fixture() {
    let proposed = MediaFormat::new().with(keys::CODEC, "h265");
    for fixture in TestMediaInfo::all() {
        for track_type in TrackType::ALL {
            let inputs: Vec<MediaFormat> = fixture
                .tracks
                .iter()
                .filter(|t| t.track_type == track_type)
                .map(|t| t.format.clone())
                .collect();
            let decision = RemoveTrackStrategy.decide(&inputs, proposed.clone());
            assert_eq!(
                decision.map(|d| d.disposition()),
                Ok(Disposition::Remove),
                "fixture {} / {}",
                fixture.name,
                track_type
            );
        }
    }
}

#[test]
fn test_plan_serializes_to_json() {
    let plan = remove_audio_config()
        .build_planner()
        .unwrap()
        .plan(&TestMediaInfo::h264_aac().tracks)
        .unwrap();

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["transcode_needed"], true);
    assert_eq!(json["groups"][0]["track_type"], "video");
    assert_eq!(json["groups"][0]["decision"]["disposition"], "pass_through");
    assert_eq!(json["groups"][1]["strategy"], "remove");
    assert_eq!(json["groups"][1]["decision"]["disposition"], "remove");
}
