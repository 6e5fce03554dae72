use serde::Serialize;
use std::path::{Path, PathBuf};

use super::chapters::{chapter_file_name, write_chapter_csv};
use super::options::{
    AdvancedSettings, Anamorphic, AudioSettings, AudioTrack, CropMode, Deinterlace, Denoise,
    DestinationSettings, EncodingOptions, Framerate, Mixdown, PictureSettings, SourceSettings,
    SubtitleSelection, SubtitleSettings, TitleSelection, VideoSettings,
};
use super::tables::{BASELINE_AUDIO_ENCODER, BROWSE_PLACEHOLDER};

/// Bitrate placed in track 1's `-B` slot when only later tracks set one
const BASELINE_AUDIO_BITRATE: &str = "160";

/// Chapter encoded by a preview
const PREVIEW_CHAPTER: &str = "2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    #[default]
    Full,
    /// Short sample encode: one chapter, `_sample` output name
    Preview,
}

/// Result of building a query: the argument string plus whatever was
/// written to disk for it
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EncodedQuery {
    pub query: String,
    /// Chapter CSV referenced by `--markers`, if one was written
    pub markers_file: Option<PathBuf>,
    pub warnings: Vec<String>,
}

/// Builds HandBrakeCLI argument strings from an options snapshot.
///
/// Sections are emitted in a fixed order (source, destination, picture,
/// video, audio, subtitles, chapter markers, advanced, `-v`); the CLI's
/// parser is order sensitive for some interacting flags.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    temp_dir: PathBuf,
}

impl QueryBuilder {
    /// `temp_dir` receives the chapter-name CSV files
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
        }
    }

    pub fn build(&self, options: &EncodingOptions, mode: QueryMode) -> EncodedQuery {
        let mut args = Vec::new();
        let mut warnings = Vec::new();

        apply_source(&mut args, &options.source, mode);
        apply_destination(&mut args, &options.destination, mode);
        apply_picture(&mut args, &options.picture);
        apply_video(&mut args, &options.video, &options.picture);
        apply_audio(&mut args, &options.audio);
        apply_subtitles(&mut args, &options.subtitles);
        let markers_file = self.apply_chapter_markers(&mut args, options, &mut warnings);
        apply_advanced(&mut args, &options.advanced);
        args.push("-v".to_string());

        let query = args.join(" ");
        tracing::debug!("Generated {:?} query: {}", mode, query);

        EncodedQuery {
            query,
            markers_file,
            warnings,
        }
    }

    fn apply_chapter_markers(
        &self,
        args: &mut Vec<String>,
        options: &EncodingOptions,
        warnings: &mut Vec<String>,
    ) -> Option<PathBuf> {
        let chapters = &options.chapters;
        if !chapters.markers {
            return None;
        }
        // Nothing to name: the CLI's own chapter names are what we'd write anyway
        if chapters.names.is_empty() {
            args.push("-m".to_string());
            return None;
        }

        let path = self.temp_dir.join(chapter_file_name(
            &options.source.path,
            options.source.title,
        ));

        match write_chapter_csv(&path, &chapters.names) {
            Ok(()) => {
                args.push(format!("--markers={}", quote(&path.to_string_lossy())));
                Some(path)
            }
            Err(e) => {
                tracing::warn!("{}; chapter names will not be saved in this encode", e);
                warnings.push(format!(
                    "Unable to save chapter markers file, default chapter names will be used: {}",
                    e
                ));
                args.push("-m".to_string());
                None
            }
        }
    }
}

/// Build the query for a full encode
pub fn generate_query(options: &EncodingOptions, temp_dir: &Path) -> EncodedQuery {
    QueryBuilder::new(temp_dir).build(options, QueryMode::Full)
}

/// Build the query for a preview encode
pub fn generate_preview(options: &EncodingOptions, temp_dir: &Path) -> EncodedQuery {
    QueryBuilder::new(temp_dir).build(options, QueryMode::Preview)
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value)
}

fn push_flag(args: &mut Vec<String>, flag: &str, value: impl Into<String>) {
    args.push(flag.to_string());
    args.push(value.into());
}

/// Destination for a preview: `_sample` goes in front of `.m*`, `.avi` and
/// `.ogm` extensions, other names are left alone
pub fn sample_destination(path: &str) -> String {
    let name_start = path.rfind(['\\', '/']).map_or(0, |i| i + 1);
    let Some(dot) = path[name_start..].rfind('.').map(|i| name_start + i) else {
        return path.to_string();
    };

    let ext = path[dot + 1..].to_ascii_lowercase();
    if ext.starts_with('m') || ext == "avi" || ext == "ogm" {
        format!("{}_sample{}", &path[..dot], &path[dot..])
    } else {
        path.to_string()
    }
}

/// Quality slider (0-100) as the CLI's 0.0-1.0 factor, always with a `.`
pub fn format_quality(quality: u8) -> String {
    (f64::from(quality) / 100.0).to_string()
}

/// DRC slider position as the CLI value: 1.0 plus a tenth per step
pub fn format_drc(stored: u32) -> String {
    let tenths = stored.saturating_add(10);
    if tenths % 10 == 0 {
        (tenths / 10).to_string()
    } else {
        format!("{}.{}", tenths / 10, tenths % 10)
    }
}

fn apply_source(args: &mut Vec<String>, source: &SourceSettings, mode: QueryMode) {
    let path = source.path.trim();
    if !path.is_empty() && path != BROWSE_PLACEHOLDER {
        push_flag(args, "-i", quote(&source.path));
    }

    if let TitleSelection::Index(n) = source.title {
        push_flag(args, "-t", n.to_string());
    }

    if mode == QueryMode::Preview {
        push_flag(args, "-c", PREVIEW_CHAPTER);
        return;
    }
    match (source.chapter_start, source.chapter_finish) {
        (Some(start), Some(finish)) if start == finish => {
            push_flag(args, "-c", start.to_string());
        }
        (Some(start), Some(finish)) => {
            push_flag(args, "-c", format!("{}-{}", start, finish));
        }
        _ => {}
    }
}

fn apply_destination(args: &mut Vec<String>, dest: &DestinationSettings, mode: QueryMode) {
    if !dest.path.is_empty() {
        let path = match mode {
            QueryMode::Full => dest.path.clone(),
            QueryMode::Preview => sample_destination(&dest.path),
        };
        push_flag(args, "-o", quote(&path));
    }

    push_flag(args, "-e", dest.video_encoder.token());

    if let Some(width) = dest.width {
        push_flag(args, "-w", width.to_string());
    }
    if let Some(height) = dest.height {
        push_flag(args, "-l", height.to_string());
    }
}

fn apply_picture(args: &mut Vec<String>, picture: &PictureSettings) {
    match picture.crop {
        CropMode::Automatic => {}
        CropMode::NoCrop => push_flag(args, "--crop", "0:0:0:0"),
        CropMode::Custom(margins) if margins.is_blank() => {}
        CropMode::Custom(margins) => {
            push_flag(
                args,
                "--crop",
                format!(
                    "{}:{}:{}:{}",
                    margins.top.unwrap_or(0),
                    margins.bottom.unwrap_or(0),
                    margins.left.unwrap_or(0),
                    margins.right.unwrap_or(0)
                ),
            );
        }
    }

    if picture.deinterlace != Deinterlace::None {
        args.push(format!("--deinterlace={}", quote(picture.deinterlace.token())));
    }
    if picture.deblock {
        args.push("--deblock".to_string());
    }
    if picture.detelecine {
        args.push("--detelecine".to_string());
    }
    if picture.vfr {
        args.push("-V".to_string());
    }
    if picture.grayscale {
        args.push("-g".to_string());
    }
    match picture.anamorphic {
        Anamorphic::Off => {}
        Anamorphic::Strict => args.push("-p".to_string()),
        Anamorphic::Loose => args.push("-P".to_string()),
    }
}

fn apply_video(args: &mut Vec<String>, video: &VideoSettings, picture: &PictureSettings) {
    if let Some(bitrate) = video.bitrate {
        push_flag(args, "-b", bitrate.to_string());
    }
    if let Some(size) = video.target_size {
        push_flag(args, "-S", size.to_string());
    }
    if video.quality > 0 {
        push_flag(args, "-q", format_quality(video.quality));
    }
    if video.two_pass {
        args.push("-2".to_string());
    }
    // Variable frame rate owns the output rate
    if let Framerate::Fixed(rate) = &video.framerate {
        if !picture.vfr {
            push_flag(args, "-r", rate.clone());
        }
    }
    if video.turbo_first_pass {
        args.push("-T".to_string());
    }
    if video.ipod_atom {
        args.push("-I".to_string());
    }
    if video.optimize_mp4 {
        args.push("-O".to_string());
    }
    if video.large_file {
        args.push("-4".to_string());
    }
    if picture.denoise != Denoise::None {
        args.push(format!("--denoise={}", quote(picture.denoise.token())));
    }
}

/// Emit a comma column whose first slot belongs to track 1. When track 1 has
/// no value but later tracks do, `filler` keeps the later values in position.
fn push_column(
    args: &mut Vec<String>,
    flag: &str,
    first: Option<String>,
    filler: &str,
    rest: Vec<String>,
) {
    let first = match first {
        Some(value) => value,
        None if !rest.is_empty() => filler.to_string(),
        None => return,
    };

    let mut column = vec![first];
    column.extend(rest);
    push_flag(args, flag, column.join(","));
}

fn apply_audio(args: &mut Vec<String>, audio: &AudioSettings) {
    let track1 = &audio.track1;
    let secondary: Vec<(usize, &AudioTrack)> = audio
        .active_tracks()
        .filter(|(n, _)| *n > 1)
        .collect();

    // Track selection
    if !(track1.source.is_none() && secondary.is_empty()) {
        let mut column = vec![track1.source.token()];
        column.extend(secondary.iter().map(|(_, t)| t.source.token()));
        push_flag(args, "-a", column.join(","));
    }

    // Encoders: track 2 falls back to the baseline encoder so presets that
    // only name one encoder still line up
    let encoders = secondary
        .iter()
        .filter_map(|(n, t)| match t.encoder {
            Some(encoder) => Some(encoder.token().to_string()),
            None if *n == 2 => Some(BASELINE_AUDIO_ENCODER.token().to_string()),
            None => None,
        })
        .collect();
    push_column(
        args,
        "-E",
        track1.encoder.map(|e| e.token().to_string()),
        BASELINE_AUDIO_ENCODER.token(),
        encoders,
    );

    // Bitrates
    let bitrates = secondary
        .iter()
        .filter_map(|(_, t)| t.bitrate.map(|b| b.to_string()))
        .collect();
    push_column(
        args,
        "-B",
        track1.bitrate.map(|b| b.to_string()),
        BASELINE_AUDIO_BITRATE,
        bitrates,
    );

    // Sample rates: an active track 2 always gets a slot, "0" when unset
    let rates = secondary
        .iter()
        .filter_map(|(n, t)| match &t.sample_rate {
            Some(rate) => Some(rate.token().to_string()),
            None if *n == 2 => Some("0".to_string()),
            None => None,
        })
        .collect();
    push_column(
        args,
        "-R",
        track1.sample_rate.as_ref().map(|r| r.token().to_string()),
        "0",
        rates,
    );

    // Mixdowns: the column only exists once track 1 names one; later
    // automatic entries are left out
    if track1.mixdown != Mixdown::Automatic {
        let mut column = vec![track1.mixdown.token()];
        column.extend(
            secondary
                .iter()
                .map(|(_, t)| t.mixdown)
                .filter(|m| *m != Mixdown::Automatic)
                .map(|m| m.token()),
        );
        push_flag(args, "-6", column.join(","));
    }

    // DRC: every track up to the last compressed one, uncompressed as "1"
    let tracks: Vec<&AudioTrack> = audio.active_tracks().map(|(_, t)| t).collect();
    if let Some(last) = tracks.iter().rposition(|t| t.drc > 0) {
        let column: Vec<String> = tracks[..=last].iter().map(|t| format_drc(t.drc)).collect();
        push_flag(args, "-D", column.join(","));
    }
}

fn apply_subtitles(args: &mut Vec<String>, subtitles: &SubtitleSettings) {
    match subtitles.selection {
        SubtitleSelection::None => {}
        SubtitleSelection::Autoselect => args.push("-U".to_string()),
        SubtitleSelection::Index(n) => push_flag(args, "-s", n.to_string()),
    }
    if subtitles.forced_only {
        args.push("-F".to_string());
    }
}

fn apply_advanced(args: &mut Vec<String>, advanced: &AdvancedSettings) {
    let encoder_options = advanced.encoder_options.trim();
    if encoder_options.contains(char::is_whitespace) {
        push_flag(args, "-x", quote(encoder_options));
    } else if !encoder_options.is_empty() {
        push_flag(args, "-x", encoder_options);
    }
    if let Some(processors) = advanced.processors {
        push_flag(args, "-C", processors.to_string());
    }
}
