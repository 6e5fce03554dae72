#![allow(dead_code)]

use hbquery::engine::{
    Anamorphic, AudioEncoder, AudioTrack, Deinterlace, EncodedQuery, EncodingOptions, Mixdown,
    PresetApplier, QueryBuilder, QueryMode, SampleRate, TitleSelection, TrackSelection,
    parse_query,
};
use tempfile::TempDir;

/// A typical DVD rip: title 2, chapters 1-12, x264 at 60% quality, one AAC track
pub fn movie_options() -> EncodingOptions {
    let mut options = EncodingOptions::default();
    options.source.path = "/rips/MOVIE.iso".to_string();
    options.source.title = TitleSelection::Index(2);
    options.source.chapter_start = Some(1);
    options.source.chapter_finish = Some(12);
    options.destination.path = "/out/MOVIE.mp4".to_string();
    options.picture.deinterlace = Deinterlace::Fast;
    options.picture.anamorphic = Anamorphic::Strict;
    options.video.quality = 60;
    options.audio.track1 = AudioTrack {
        source: TrackSelection::Index(1),
        encoder: Some(AudioEncoder::Aac),
        bitrate: Some(160),
        sample_rate: Some(SampleRate::Khz("48".to_string())),
        mixdown: Mixdown::DolbyProLogic2,
        drc: 0,
    };
    options
}

/// `movie_options` plus an AC3 surround track and a Vorbis commentary track
pub fn multi_track_options() -> EncodingOptions {
    let mut options = movie_options();
    options.audio.set_track(
        2,
        AudioTrack {
            source: TrackSelection::Index(2),
            encoder: Some(AudioEncoder::Ac3),
            mixdown: Mixdown::SixChannel,
            drc: 15,
            ..AudioTrack::default()
        },
    );
    options.audio.set_track(
        3,
        AudioTrack {
            source: TrackSelection::Index(3),
            encoder: Some(AudioEncoder::Vorbis),
            bitrate: Some(128),
            ..AudioTrack::default()
        },
    );
    options
}

/// Build a query with its own scratch directory for chapter files
pub fn build(options: &EncodingOptions, mode: QueryMode) -> (TempDir, EncodedQuery) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let encoded = QueryBuilder::new(dir.path()).build(options, mode);
    (dir, encoded)
}

pub fn full_query(options: &EncodingOptions) -> String {
    build(options, QueryMode::Full).1.query
}

pub fn preview_query(options: &EncodingOptions) -> String {
    build(options, QueryMode::Preview).1.query
}

/// Parse a query and apply it onto default settings
pub fn load_preset(query: &str) -> EncodingOptions {
    let parsed = parse_query(query).expect("Failed to parse query");
    PresetApplier::new().apply(&parsed)
}
