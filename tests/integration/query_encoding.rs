// Integration tests for query generation
//
// Flag presence, ordering and formatting for complete settings snapshots.

use hbquery::engine::{
    BROWSE_PLACEHOLDER, CropMargins, CropMode, EncodingOptions, Framerate, SubtitleSelection,
    TitleSelection, TrackSelection,
};

use crate::common::assertions::*;
use crate::common::helpers::*;

// ============================================================================
// Source and destination
// ============================================================================

#[test]
fn test_default_settings_query() {
    assert_eq!(full_query(&EncodingOptions::default()), "-e x264 -a 1 -v");
}

#[test]
fn test_movie_query() {
    let query = full_query(&movie_options());
    assert_eq!(
        query,
        "-i \"/rips/MOVIE.iso\" -t 2 -c 1-12 -o \"/out/MOVIE.mp4\" -e x264 \
         --deinterlace=\"fast\" -p -q 0.6 -a 1 -E faac -B 160 -R 48 -6 dpl2 -v"
    );
}

#[test]
fn test_placeholder_source_is_skipped() {
    let mut options = movie_options();
    options.source.path = BROWSE_PLACEHOLDER.to_string();
    let query = full_query(&options);
    assert_query_not_contains(&query, "-i");
    assert!(query.starts_with("-t 2 "));
}

#[test]
fn test_single_chapter_range() {
    let mut options = movie_options();
    options.source.chapter_start = Some(4);
    options.source.chapter_finish = Some(4);
    assert_flag_value(&full_query(&options), "-c", "4");

    options.source.chapter_finish = None;
    assert_query_not_contains(&full_query(&options), "-c");
}

#[test]
fn test_automatic_title_has_no_flag() {
    let mut options = movie_options();
    options.source.title = TitleSelection::Automatic;
    assert_query_not_contains(&full_query(&options), "-t");
}

#[test]
fn test_dimensions() {
    let mut options = movie_options();
    options.destination.width = Some(720);
    options.destination.height = Some(480);
    let query = full_query(&options);
    assert_flag_value(&query, "-w", "720");
    assert_flag_value(&query, "-l", "480");
    assert_flag_order(&query, "-e", "-w");
}

// ============================================================================
// Preview
// ============================================================================

#[test]
fn test_preview_overrides_chapters_and_name() {
    let query = preview_query(&movie_options());
    assert_flag_value(&query, "-c", "2");
    assert_flag_value(&query, "-o", "\"/out/MOVIE_sample.mp4\"");
}

#[test]
fn test_preview_forces_chapter_without_range() {
    let mut options = movie_options();
    options.source.chapter_start = None;
    options.source.chapter_finish = None;
    assert_flag_value(&preview_query(&options), "-c", "2");
}

// ============================================================================
// Picture and video
// ============================================================================

#[test]
fn test_crop_modes() {
    let mut options = movie_options();
    options.picture.crop = CropMode::NoCrop;
    assert_flag_value(&full_query(&options), "--crop", "0:0:0:0");

    options.picture.crop = CropMode::Custom(CropMargins {
        top: Some(8),
        left: Some(2),
        ..CropMargins::default()
    });
    assert_flag_value(&full_query(&options), "--crop", "8:0:2:0");

    options.picture.crop = CropMode::Custom(CropMargins::default());
    assert_query_not_contains(&full_query(&options), "--crop");
}

#[test]
fn test_vfr_suppresses_framerate() {
    let mut options = movie_options();
    options.video.framerate = Framerate::Fixed("23.976".to_string());
    assert_flag_value(&full_query(&options), "-r", "23.976");

    options.picture.vfr = true;
    let query = full_query(&options);
    assert_query_contains(&query, "-V");
    assert_query_not_contains(&query, "-r");
}

#[test]
fn test_quality_formatting() {
    let mut options = movie_options();
    for (quality, expected) in [(1, "0.01"), (55, "0.55"), (100, "1")] {
        options.video.quality = quality;
        assert_flag_value(&full_query(&options), "-q", expected);
    }

    options.video.quality = 0;
    assert_query_not_contains(&full_query(&options), "-q");
}

#[test]
fn test_two_pass_flags() {
    let mut options = movie_options();
    options.video.two_pass = true;
    options.video.turbo_first_pass = true;
    let query = full_query(&options);
    assert_flag_order(&query, "-2", "-T");
}

// ============================================================================
// Audio columns
// ============================================================================

#[test]
fn test_multi_track_columns() {
    let query = full_query(&multi_track_options());
    assert_flag_value(&query, "-a", "1,2,3");
    assert_flag_value(&query, "-E", "faac,ac3,vorbis");
    assert_flag_value(&query, "-B", "160,128");
    assert_flag_value(&query, "-R", "48,0");
    assert_flag_value(&query, "-6", "dpl2,6ch");
    assert_flag_value(&query, "-D", "1,2.5");
    assert_columns_aligned(&query);
}

#[test]
fn test_track_one_fillers_keep_columns_aligned() {
    let mut options = multi_track_options();
    options.audio.track1.encoder = None;
    options.audio.track1.bitrate = None;
    options.audio.track1.sample_rate = None;
    let query = full_query(&options);
    assert_flag_value(&query, "-E", "faac,ac3,vorbis");
    assert_flag_value(&query, "-B", "160,128");
    assert_flag_value(&query, "-R", "0,0");
    assert_columns_aligned(&query);
}

#[test]
fn test_disabled_tracks_are_left_out() {
    let mut options = multi_track_options();
    options.audio.disable_track(2);
    let query = full_query(&options);
    assert_flag_value(&query, "-a", "1,3");
    assert_flag_value(&query, "-E", "faac,vorbis");
    assert_query_not_contains(&query, "-D");
}

#[test]
fn test_no_audio() {
    let mut options = movie_options();
    options.audio.track1.source = TrackSelection::None;
    assert_query_not_contains(&full_query(&options), "-a");
}

// ============================================================================
// Subtitles, markers and advanced
// ============================================================================

#[test]
fn test_subtitles() {
    let mut options = movie_options();
    options.subtitles.selection = SubtitleSelection::Autoselect;
    options.subtitles.forced_only = true;
    let query = full_query(&options);
    assert_flag_order(&query, "-U", "-F");

    options.subtitles.selection = SubtitleSelection::Index(3);
    assert_flag_value(&full_query(&options), "-s", "3");
}

#[test]
fn test_advanced_options_come_last() {
    let mut options = movie_options();
    options.chapters.markers = true;
    options.advanced.encoder_options = "ref=2:bframes=3".to_string();
    options.advanced.processors = Some(4);
    let query = full_query(&options);

    assert_flag_order(&query, "-m", "-x");
    assert_flag_order(&query, "-x", "-C");
    assert!(query.ends_with("-x ref=2:bframes=3 -C 4 -v"));
}
