//! Media file probing with FFmpeg
//!
//! Builds one `Track` per audio and video stream of a source file so the
//! planner can run on real inputs.

use std::path::Path;

use ffmpeg_next as ffmpeg;

use crate::error::{PlanError, Result};
use crate::format::{keys, MediaFormat, Track, TrackType};

/// Open a media file and describe its audio and video streams
pub fn probe_file<P: AsRef<Path>>(path: P) -> Result<Vec<Track>> {
    let path = path.as_ref();

    ffmpeg::init().map_err(|e| PlanError::Ffmpeg(format!("ffmpeg::init() failed: {}", e)))?;

    let context = ffmpeg::format::input(&path)
        .map_err(|e| PlanError::Ffmpeg(format!("Failed to open {:?}: {}", path, e)))?;

    let mut tracks = Vec::new();
    for stream in context.streams() {
        let index = stream.index();
        let medium = stream.parameters().medium();

        let track = match medium {
            ffmpeg::media::Type::Video => Track::new(index, TrackType::Video, describe_video(&stream)),
            ffmpeg::media::Type::Audio => Track::new(index, TrackType::Audio, describe_audio(&stream)),
            _ => {
                tracing::debug!("Skipping stream {} (type={:?})", index, medium);
                continue;
            }
        };
        tracing::debug!(
            "Found {} stream {}: {}",
            track.track_type,
            index,
            track.format
        );
        tracks.push(track);
    }

    tracing::info!("Probed {:?}: {} audio/video tracks", path, tracks.len());
    Ok(tracks)
}

fn describe_video(stream: &ffmpeg::Stream) -> MediaFormat {
    let codec_id = stream.parameters().id();
    let (width, height, bit_rate) = unsafe {
        let params_ptr = stream.parameters().as_ptr();
        (
            (*params_ptr).width as i64,
            (*params_ptr).height as i64,
            (*params_ptr).bit_rate,
        )
    };

    let mut format = MediaFormat::new()
        .with(keys::CODEC, codec_name(codec_id))
        .with(keys::WIDTH, width)
        .with(keys::HEIGHT, height);

    let rate = stream.avg_frame_rate();
    if rate.numerator() > 0 && rate.denominator() > 0 {
        format.set(
            keys::FRAME_RATE,
            rate.numerator() as f64 / rate.denominator() as f64,
        );
    }
    if bit_rate > 0 {
        format.set(keys::BIT_RATE, bit_rate);
    }
    if let Some(language) = stream_language(stream) {
        format.set(keys::LANGUAGE, language);
    }
    format
}

fn describe_audio(stream: &ffmpeg::Stream) -> MediaFormat {
    let codec_id = stream.parameters().id();
    let (sample_rate, channels, bit_rate) = unsafe {
        let params_ptr = stream.parameters().as_ptr();
        (
            (*params_ptr).sample_rate as i64,
            (*params_ptr).ch_layout.nb_channels as i64,
            (*params_ptr).bit_rate,
        )
    };

    let mut format = MediaFormat::new()
        .with(keys::CODEC, codec_name(codec_id))
        .with(keys::SAMPLE_RATE, sample_rate)
        .with(keys::CHANNEL_COUNT, channels);

    if bit_rate > 0 {
        format.set(keys::BIT_RATE, bit_rate);
    }
    if let Some(language) = stream_language(stream) {
        format.set(keys::LANGUAGE, language);
    }
    format
}

fn stream_language(stream: &ffmpeg::Stream) -> Option<String> {
    stream.metadata().get("language").map(|s| s.to_string())
}

/// Descriptor codec string for an FFmpeg codec id
pub fn codec_name(codec_id: ffmpeg::codec::Id) -> String {
    match codec_id {
        ffmpeg::codec::Id::H264 => "h264",
        ffmpeg::codec::Id::HEVC => "h265",
        ffmpeg::codec::Id::VP9 => "vp9",
        ffmpeg::codec::Id::AV1 => "av1",
        ffmpeg::codec::Id::AAC => "aac",
        ffmpeg::codec::Id::AC3 => "ac3",
        ffmpeg::codec::Id::EAC3 => "eac3",
        ffmpeg::codec::Id::OPUS => "opus",
        ffmpeg::codec::Id::MP3 => "mp3",
        ffmpeg::codec::Id::FLAC => "flac",
        ffmpeg::codec::Id::VORBIS => "vorbis",
        other => other.name(),
    }
    .to_string()
}
