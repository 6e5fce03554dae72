use super::options::{
    Anamorphic, AudioEncoder, AudioTrack, CropMargins, CropMode, Deinterlace, Denoise,
    EncodingOptions, Framerate, Mixdown, SampleRate, SubtitleSelection, TitleSelection,
    TrackSelection, VideoEncoder,
};
use super::query_parser::ParsedQuery;
use super::tables::Container;
use super::titles::{TitleOption, select_longest_title};

/// Extensions a container change is allowed to rewrite in the destination
const KNOWN_EXTENSIONS: [&str; 5] = ["mp4", "m4v", "avi", "mkv", "ogm"];

/// Applies a parsed preset query onto an options snapshot.
///
/// Fields the query sets are taken from it; fields it leaves out are reset
/// to their defaults where a stale value would be wrong (chapter range,
/// flags) and left alone otherwise (source path, processors).
#[derive(Debug, Clone, Default)]
pub struct PresetApplier {
    titles: Vec<TitleOption>,
}

impl PresetApplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Titles scanned from the current source; the longest one is selected
    /// unless the query names a title itself
    pub fn with_titles(mut self, titles: Vec<TitleOption>) -> Self {
        self.titles = titles;
        self
    }

    pub fn apply(&self, parsed: &ParsedQuery) -> EncodingOptions {
        self.apply_onto(EncodingOptions::default(), parsed)
    }

    pub fn apply_onto(&self, base: EncodingOptions, parsed: &ParsedQuery) -> EncodingOptions {
        let mut options = base;

        self.apply_source(&mut options, parsed);
        apply_destination(&mut options, parsed);
        apply_picture(&mut options, parsed);
        apply_video(&mut options, parsed);
        apply_chapter_markers(&mut options, parsed);
        apply_audio(&mut options, parsed);
        apply_subtitles(&mut options, parsed);
        apply_advanced(&mut options, parsed);

        options
    }

    fn apply_source(&self, options: &mut EncodingOptions, parsed: &ParsedQuery) {
        if let Some(source) = parsed.source.as_deref().filter(|s| !s.is_empty()) {
            options.source.path = source.to_string();
        }

        if let Some(title) = parsed.title {
            options.source.title = TitleSelection::Index(title);
        } else if let Some(longest) = select_longest_title(&self.titles) {
            options.source.title = TitleSelection::Index(longest.number);
        }

        // Never carry the previous source's chapter range over
        options.source.chapter_start = parsed.chapter_start;
        options.source.chapter_finish = parsed.chapter_finish;

        if let Some(container) = parsed.format.as_deref().and_then(Container::from_token) {
            options.destination.path = replace_extension(&options.destination.path, container);
            options.destination.format = container;
        }
    }
}

/// Swap a known container extension at the end of `path` for `container`'s
pub fn replace_extension(path: &str, container: Container) -> String {
    match path.rsplit_once('.') {
        Some((stem, ext))
            if KNOWN_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
                && !stem.ends_with(['/', '\\']) =>
        {
            format!("{}.{}", stem, container.extension())
        }
        _ => path.to_string(),
    }
}

fn apply_destination(options: &mut EncodingOptions, parsed: &ParsedQuery) {
    let dest = &mut options.destination;
    if let Some(path) = parsed.destination.as_deref().filter(|p| !p.is_empty()) {
        dest.path = path.to_string();
    }
    dest.video_encoder = parsed
        .video_encoder
        .as_deref()
        .map(VideoEncoder::from_token)
        .unwrap_or_default();
    dest.width = parsed.width.filter(|w| *w > 0);
    dest.height = parsed.height.filter(|h| *h > 0);

    options.video.ipod_atom = parsed.ipod_atom;
    options.video.optimize_mp4 = parsed.optimize_mp4;
}

fn apply_picture(options: &mut EncodingOptions, parsed: &ParsedQuery) {
    let picture = &mut options.picture;

    picture.crop = match parsed.crop {
        Some([top, bottom, left, right]) => {
            CropMode::Custom(CropMargins::new(top, bottom, left, right))
        }
        None => CropMode::Automatic,
    };
    picture.deinterlace = parsed
        .deinterlace
        .as_deref()
        .map(Deinterlace::from_token)
        .unwrap_or_default();
    picture.denoise = parsed
        .denoise
        .as_deref()
        .map(Denoise::from_token)
        .unwrap_or_default();
    picture.detelecine = parsed.detelecine;
    picture.deblock = parsed.deblock;
    picture.grayscale = parsed.grayscale;
    picture.vfr = parsed.vfr;
    picture.anamorphic = if parsed.loose_anamorphic {
        Anamorphic::Loose
    } else if parsed.anamorphic {
        Anamorphic::Strict
    } else {
        Anamorphic::Off
    };
}

fn apply_video(options: &mut EncodingOptions, parsed: &ParsedQuery) {
    let video = &mut options.video;
    video.bitrate = parsed.video_bitrate;
    video.target_size = parsed.target_size;
    video.quality = parsed.quality.unwrap_or(0);
    video.two_pass = parsed.two_pass;
    video.turbo_first_pass = parsed.turbo_first_pass;
    video.large_file = parsed.large_file;
    video.framerate = parsed
        .framerate
        .clone()
        .map(Framerate::from)
        .unwrap_or_default();
}

fn apply_chapter_markers(options: &mut EncodingOptions, parsed: &ParsedQuery) {
    options.chapters.markers = parsed.chapter_markers;

    // Chapter markers need the m4v extension to be honoured by players
    if parsed.chapter_markers {
        let dest = &mut options.destination;
        if let Some(stem) = dest.path.strip_suffix(".mp4") {
            dest.path = format!("{}.m4v", stem);
            dest.format = Container::M4v;
        }
    }
}

/// Stored DRC slider value for a parsed level in tenths (25 -> 15)
pub fn drc_from_parsed(tenths: u32) -> u32 {
    if tenths > 0 { tenths.saturating_sub(10) } else { tenths }
}

fn is_none_selector(selector: &str) -> bool {
    selector.trim().eq_ignore_ascii_case("none")
}

/// Fill a track's dependent fields from column position `idx`
fn track_from_columns(source: TrackSelection, parsed: &ParsedQuery, idx: usize) -> AudioTrack {
    AudioTrack {
        source,
        encoder: parsed
            .audio_encoders
            .get(idx)
            .and_then(|e| AudioEncoder::from_token(e)),
        bitrate: parsed
            .audio_bitrates
            .get(idx)
            .and_then(|b| b.parse().ok()),
        sample_rate: parsed
            .sample_rates
            .get(idx)
            .map(|r| SampleRate::from(r.clone())),
        mixdown: parsed
            .mixdowns
            .get(idx)
            .map(|m| Mixdown::from_token(m))
            .unwrap_or_default(),
        drc: parsed.drc.get(idx).copied().map_or(0, drc_from_parsed),
    }
}

fn apply_audio(options: &mut EncodingOptions, parsed: &ParsedQuery) {
    let selector = |n: usize| parsed.audio_tracks.get(n - 1).map(String::as_str);
    let parse_selector = |s: &str| s.parse::<TrackSelection>().unwrap_or_default();

    // Track 1: an empty selection means automatic; settings the query
    // doesn't carry keep their current value
    let mut track1 = track_from_columns(
        selector(1).map_or(TrackSelection::Automatic, parse_selector),
        parsed,
        0,
    );
    let current = &options.audio.track1;
    if parsed.audio_encoders.is_empty() {
        track1.encoder = current.encoder;
    }
    if parsed.audio_bitrates.is_empty() {
        track1.bitrate = current.bitrate;
    }
    if parsed.sample_rates.is_empty() {
        track1.sample_rate = current.sample_rate.clone();
    }
    options.audio.set_track(1, track1);

    // Track 2: older presets list a second encoder without a second track
    let track2 = if parsed.audio_encoders.len() > 1 {
        Some(match selector(2) {
            Some(s) if !is_none_selector(s) => parse_selector(s),
            _ => TrackSelection::Automatic,
        })
    } else {
        selector(2)
            .filter(|s| !is_none_selector(s))
            .map(parse_selector)
    };

    // Tracks 3 and 4 only exist when selected
    let selections = [
        (2, track2),
        (3, selector(3).filter(|s| !is_none_selector(s)).map(parse_selector)),
        (4, selector(4).filter(|s| !is_none_selector(s)).map(parse_selector)),
    ];
    for (n, selection) in selections {
        match selection {
            Some(source) => options
                .audio
                .set_track(n, track_from_columns(source, parsed, n - 1)),
            None => options.audio.disable_track(n),
        }
    }
}

fn apply_subtitles(options: &mut EncodingOptions, parsed: &ParsedQuery) {
    let subtitles = &mut options.subtitles;
    subtitles.selection = match (parsed.subtitle, parsed.subtitle_scan) {
        (Some(n), _) => SubtitleSelection::Index(n),
        (None, true) => SubtitleSelection::Autoselect,
        (None, false) => SubtitleSelection::None,
    };
    subtitles.forced_only = parsed.forced_subtitles;
}

fn apply_advanced(options: &mut EncodingOptions, parsed: &ParsedQuery) {
    options.advanced.encoder_options = parsed.encoder_options.clone().unwrap_or_default();
    if parsed.processors.is_some() {
        options.advanced.processors = parsed.processors;
    }
}
