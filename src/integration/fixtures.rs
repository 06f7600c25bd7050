//! Test fixtures for integration tests
//!
//! Provides track layouts for common sources without real media files.

use crate::format::{keys, MediaFormat, Track, TrackType};

/// Test source description
#[derive(Debug, Clone)]
pub struct TestMediaInfo {
    pub name: &'static str,
    pub tracks: Vec<Track>,
}

pub fn video(codec: &str, width: i64, height: i64, frame_rate: f64) -> MediaFormat {
    MediaFormat::new()
        .with(keys::CODEC, codec)
        .with(keys::WIDTH, width)
        .with(keys::HEIGHT, height)
        .with(keys::FRAME_RATE, frame_rate)
}

pub fn audio(codec: &str, channels: i64, sample_rate: i64) -> MediaFormat {
    MediaFormat::new()
        .with(keys::CODEC, codec)
        .with(keys::CHANNEL_COUNT, channels)
        .with(keys::SAMPLE_RATE, sample_rate)
}

impl TestMediaInfo {
    /// 1080p H.264 with stereo AAC
    pub fn h264_aac() -> Self {
        Self {
            name: "h264_aac",
            tracks: vec![
                Track::new(0, TrackType::Video, video("h264", 1920, 1080, 24.0)),
                Track::new(1, TrackType::Audio, audio("aac", 2, 48000)),
            ],
        }
    }

    /// 720p H.264 with stereo AAC, already within default targets
    pub fn h264_aac_720p() -> Self {
        Self {
            name: "h264_aac_720p",
            tracks: vec![
                Track::new(0, TrackType::Video, video("h264", 1280, 720, 25.0)),
                Track::new(1, TrackType::Audio, audio("aac", 2, 44100)),
            ],
        }
    }

    /// HEVC with 5.1 AC-3 and a stereo commentary track
    pub fn hevc_ac3_commentary() -> Self {
        Self {
            name: "hevc_ac3_commentary",
            tracks: vec![
                Track::new(0, TrackType::Video, video("h265", 3840, 2160, 23.976)),
                Track::new(
                    1,
                    TrackType::Audio,
                    audio("ac3", 6, 48000).with(keys::LANGUAGE, "en"),
                ),
                Track::new(
                    2,
                    TrackType::Audio,
                    audio("aac", 2, 44100).with(keys::LANGUAGE, "en"),
                ),
            ],
        }
    }

    /// Audio only: stereo 44.1 kHz and mono 8 kHz
    pub fn two_audio_only() -> Self {
        Self {
            name: "two_audio_only",
            tracks: vec![
                Track::new(0, TrackType::Audio, audio("aac", 2, 44100)),
                Track::new(1, TrackType::Audio, audio("pcm_s16le", 1, 8000)),
            ],
        }
    }

    /// Video track whose descriptor lacks dimensions
    pub fn broken_video() -> Self {
        Self {
            name: "broken_video",
            tracks: vec![
                Track::new(0, TrackType::Video, MediaFormat::new().with(keys::CODEC, "h264")),
                Track::new(1, TrackType::Audio, audio("aac", 2, 48000)),
            ],
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::h264_aac(),
            Self::h264_aac_720p(),
            Self::hevc_ac3_commentary(),
            Self::two_audio_only(),
            Self::broken_video(),
        ]
    }
}
