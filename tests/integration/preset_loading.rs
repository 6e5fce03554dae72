// Integration tests for loading query strings back into settings
//
// Covers realistic preset strings and generate -> load round trips.

use hbquery::engine::{
    Anamorphic, AudioEncoder, Container, CropMargins, CropMode, Denoise, EncodingOptions,
    Framerate, Mixdown, PresetApplier, SampleRate, SubtitleSelection, Title, TitleOption,
    TitleSelection, TrackSelection, VideoEncoder, parse_query,
};

use crate::common::helpers::*;

// ============================================================================
// Realistic presets
// ============================================================================

#[test]
fn test_ipod_style_preset() {
    let options = load_preset(
        "-e x264 -b 700 -w 320 -l 240 -I -E faac -B 160 -R 48 -6 stereo -x level=30:cabac=0 -v",
    );

    assert_eq!(options.destination.video_encoder, VideoEncoder::X264);
    assert_eq!(options.destination.width, Some(320));
    assert_eq!(options.destination.height, Some(240));
    assert_eq!(options.video.bitrate, Some(700));
    assert!(options.video.ipod_atom);
    assert_eq!(options.audio.track1.encoder, Some(AudioEncoder::Aac));
    assert_eq!(options.audio.track1.bitrate, Some(160));
    assert_eq!(
        options.audio.track1.sample_rate,
        Some(SampleRate::Khz("48".to_string()))
    );
    assert_eq!(options.audio.track1.mixdown, Mixdown::Stereo);
    assert_eq!(options.advanced.encoder_options, "level=30:cabac=0");
}

#[test]
fn test_film_preset() {
    let options = load_preset(
        "-e x264 -q 0.65 -2 -T -P --crop 0:0:8:8 --denoise=\"weak\" -r 23.976 -m -U -F -v",
    );

    assert_eq!(options.video.quality, 65);
    assert!(options.video.two_pass);
    assert!(options.video.turbo_first_pass);
    assert_eq!(options.picture.anamorphic, Anamorphic::Loose);
    assert_eq!(
        options.picture.crop,
        CropMode::Custom(CropMargins::new(0, 0, 8, 8))
    );
    assert_eq!(options.picture.denoise, Denoise::Weak);
    assert_eq!(options.video.framerate, Framerate::Fixed("23.976".to_string()));
    assert!(options.chapters.markers);
    assert_eq!(options.subtitles.selection, SubtitleSelection::Autoselect);
    assert!(options.subtitles.forced_only);
}

#[test]
fn test_missing_crop_means_automatic() {
    let options = load_preset("-e x264 -v");
    assert_eq!(options.picture.crop, CropMode::Automatic);
    assert_eq!(options.video.framerate, Framerate::SameAsSource);
    assert_eq!(options.video.quality, 0);
}

#[test]
fn test_malformed_query_is_an_error() {
    assert!(parse_query("-i \"/rips/unterminated").is_err());
    assert!(parse_query("-q 65").is_err());
    assert!(parse_query("-t").is_err());
}

// ============================================================================
// Applying onto existing settings
// ============================================================================

#[test]
fn test_preset_keeps_current_source() {
    let base = movie_options();
    let parsed = parse_query("-e xvid -f avi -v").unwrap();
    let options = PresetApplier::new().apply_onto(base, &parsed);

    assert_eq!(options.source.path, "/rips/MOVIE.iso");
    assert_eq!(options.source.title, TitleSelection::Index(2));
    assert_eq!(options.source.chapter_start, None);
    assert_eq!(options.destination.path, "/out/MOVIE.avi");
    assert_eq!(options.destination.format, Container::Avi);
    assert_eq!(options.destination.video_encoder, VideoEncoder::Xvid);
}

#[test]
fn test_markers_switch_destination_to_m4v() {
    let parsed = parse_query("-e x264 -m -v").unwrap();
    let options = PresetApplier::new().apply_onto(movie_options(), &parsed);
    assert_eq!(options.destination.path, "/out/MOVIE.m4v");
    assert_eq!(options.destination.format, Container::M4v);
}

#[test]
fn test_longest_title_used_without_explicit_title() {
    let titles = vec![
        TitleOption::Automatic,
        TitleOption::Title(Title::new(1, "00:02:10")),
        TitleOption::Title(Title::new(2, "01:48:31")),
        TitleOption::Title(Title::new(3, "00:20:00")),
    ];
    let parsed = parse_query("-e x264 -v").unwrap();
    let options = PresetApplier::new()
        .with_titles(titles)
        .apply_onto(EncodingOptions::default(), &parsed);
    assert_eq!(options.source.title, TitleSelection::Index(2));
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_movie_round_trip() {
    let original = movie_options();
    let loaded = load_preset(&full_query(&original));

    assert_eq!(loaded.source, original.source);
    assert_eq!(loaded.destination, original.destination);
    assert_eq!(loaded.picture, original.picture);
    assert_eq!(loaded.video, original.video);
    assert_eq!(loaded.audio.track1, original.audio.track1);
}

#[test]
fn test_multi_track_round_trip() {
    let original = multi_track_options();
    let loaded = load_preset(&full_query(&original));

    let track2 = loaded.audio.track(2).expect("track 2 should survive");
    assert_eq!(track2.source, TrackSelection::Index(2));
    assert_eq!(track2.encoder, Some(AudioEncoder::Ac3));
    assert_eq!(track2.mixdown, Mixdown::SixChannel);
    assert_eq!(track2.drc, 15);

    let track3 = loaded.audio.track(3).expect("track 3 should survive");
    assert_eq!(track3.source, TrackSelection::Index(3));
    assert_eq!(track3.encoder, Some(AudioEncoder::Vorbis));
    assert!(loaded.audio.track(4).is_none());
}

#[test]
fn test_windows_paths_round_trip() {
    let mut original = movie_options();
    original.source.path = r"D:\".to_string();
    original.destination.path = r"E:\Movies\MOVIE.mp4".to_string();

    let loaded = load_preset(&full_query(&original));
    assert_eq!(loaded.source.path, r"D:\");
    assert_eq!(loaded.destination.path, r"E:\Movies\MOVIE.mp4");
    assert_eq!(loaded.destination.format, Container::Mp4);
}

#[test]
fn test_unc_source_round_trip() {
    let mut original = movie_options();
    original.source.path = r"\\server\share\movie.iso".to_string();

    let loaded = load_preset(&full_query(&original));
    assert_eq!(loaded.source.path, r"\\server\share\movie.iso");
}

#[test]
fn test_spaced_encoder_options_round_trip() {
    let mut original = movie_options();
    original.advanced.encoder_options = "ref=3 bframes=2".to_string();

    let loaded = load_preset(&full_query(&original));
    assert_eq!(loaded.advanced.encoder_options, "ref=3 bframes=2");
    assert_eq!(loaded.destination.path, original.destination.path);
}
