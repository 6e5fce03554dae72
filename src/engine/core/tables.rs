//! Label <-> token lookup tables.
//! Every dropdown-backed setting is an enum with one table row per variant:
//! `(variant, display label, CLI token)`. Encoding, preset loading and the
//! command line front end all resolve through these rows so they stay in sync.

use serde::{Deserialize, Serialize};

/// Source path text shown before the user picks a file
pub const BROWSE_PLACEHOLDER: &str = "Click 'Browse' to continue";

/// Default-location text shown before the user picks an output directory
pub const DEFAULT_DIR_PLACEHOLDER: &str = "Click 'Browse' to set the default location";

/// One row of a lookup table: (variant, label, token)
pub type Row<T> = (T, &'static str, &'static str);

fn by_label<T: Copy>(table: &[Row<T>], label: &str) -> Option<T> {
    table
        .iter()
        .find(|(_, l, _)| *l == label.trim())
        .map(|(v, _, _)| *v)
}

fn by_token<T: Copy>(table: &[Row<T>], token: &str) -> Option<T> {
    table
        .iter()
        .find(|(_, _, t)| !t.is_empty() && t.eq_ignore_ascii_case(token.trim()))
        .map(|(v, _, _)| *v)
}

fn row_of<T: Copy + PartialEq>(table: &[Row<T>], value: T) -> Option<&Row<T>> {
    table.iter().find(|(v, _, _)| *v == value)
}

// ============================================================================
// Video encoder
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoEncoder {
    Ffmpeg,
    Xvid,
    #[default]
    X264,
    Theora,
}

pub const VIDEO_ENCODERS: &[Row<VideoEncoder>] = &[
    (VideoEncoder::Ffmpeg, "MPEG-4 (FFmpeg)", "ffmpeg"),
    (VideoEncoder::Xvid, "MPEG-4 (XviD)", "xvid"),
    (VideoEncoder::X264, "H.264 (x264)", "x264"),
    (VideoEncoder::Theora, "VP3 (Theora)", "theora"),
];

impl VideoEncoder {
    /// Unknown labels fall back to x264
    pub fn from_label(label: &str) -> Self {
        by_label(VIDEO_ENCODERS, label).unwrap_or_default()
    }

    /// Unknown tokens fall back to x264
    pub fn from_token(token: &str) -> Self {
        by_token(VIDEO_ENCODERS, token).unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        row_of(VIDEO_ENCODERS, self).map_or("", |r| r.1)
    }

    pub fn token(self) -> &'static str {
        row_of(VIDEO_ENCODERS, self).map_or("x264", |r| r.2)
    }
}

// ============================================================================
// Audio encoder
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioEncoder {
    Aac,
    Mp3,
    Vorbis,
    Ac3,
}

pub const AUDIO_ENCODERS: &[Row<AudioEncoder>] = &[
    (AudioEncoder::Aac, "AAC", "faac"),
    (AudioEncoder::Mp3, "MP3", "lame"),
    (AudioEncoder::Vorbis, "Vorbis", "vorbis"),
    (AudioEncoder::Ac3, "AC3", "ac3"),
];

/// Encoder token used to fill a column slot that has no explicit encoder
pub const BASELINE_AUDIO_ENCODER: AudioEncoder = AudioEncoder::Aac;

impl AudioEncoder {
    pub fn from_label(label: &str) -> Option<Self> {
        by_label(AUDIO_ENCODERS, label)
    }

    pub fn from_token(token: &str) -> Option<Self> {
        by_token(AUDIO_ENCODERS, token)
    }

    pub fn label(self) -> &'static str {
        row_of(AUDIO_ENCODERS, self).map_or("", |r| r.1)
    }

    pub fn token(self) -> &'static str {
        row_of(AUDIO_ENCODERS, self).map_or("", |r| r.2)
    }
}

// ============================================================================
// Mixdown
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mixdown {
    #[default]
    Automatic,
    Mono,
    Stereo,
    DolbySurround,
    DolbyProLogic2,
    SixChannel,
}

pub const MIXDOWNS: &[Row<Mixdown>] = &[
    (Mixdown::Automatic, "Automatic", ""),
    (Mixdown::Mono, "Mono", "mono"),
    (Mixdown::Stereo, "Stereo", "stereo"),
    (Mixdown::DolbySurround, "Dolby Surround", "dpl1"),
    (Mixdown::DolbyProLogic2, "Dolby Pro Logic II", "dpl2"),
    (Mixdown::SixChannel, "6 Channel Discrete", "6ch"),
];

impl Mixdown {
    /// Unknown labels mean "let the CLI decide"
    pub fn from_label(label: &str) -> Self {
        by_label(MIXDOWNS, label).unwrap_or_default()
    }

    pub fn from_token(token: &str) -> Self {
        by_token(MIXDOWNS, token).unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        row_of(MIXDOWNS, self).map_or("Automatic", |r| r.1)
    }

    /// Empty for `Automatic`
    pub fn token(self) -> &'static str {
        row_of(MIXDOWNS, self).map_or("", |r| r.2)
    }
}

// ============================================================================
// Picture filters
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deinterlace {
    #[default]
    None,
    Fast,
    Slow,
    Slower,
    Slowest,
}

pub const DEINTERLACE_LEVELS: &[Row<Deinterlace>] = &[
    (Deinterlace::None, "None", ""),
    (Deinterlace::Fast, "Fast", "fast"),
    (Deinterlace::Slow, "Slow", "slow"),
    (Deinterlace::Slower, "Slower", "slower"),
    (Deinterlace::Slowest, "Slowest", "slowest"),
];

impl Deinterlace {
    pub fn from_label(label: &str) -> Self {
        by_label(DEINTERLACE_LEVELS, label).unwrap_or_default()
    }

    pub fn from_token(token: &str) -> Self {
        by_token(DEINTERLACE_LEVELS, token).unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        row_of(DEINTERLACE_LEVELS, self).map_or("None", |r| r.1)
    }

    pub fn token(self) -> &'static str {
        row_of(DEINTERLACE_LEVELS, self).map_or("", |r| r.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Denoise {
    #[default]
    None,
    Weak,
    Medium,
    Strong,
}

pub const DENOISE_LEVELS: &[Row<Denoise>] = &[
    (Denoise::None, "None", ""),
    (Denoise::Weak, "Weak", "weak"),
    (Denoise::Medium, "Medium", "medium"),
    (Denoise::Strong, "Strong", "strong"),
];

impl Denoise {
    pub fn from_label(label: &str) -> Self {
        by_label(DENOISE_LEVELS, label).unwrap_or_default()
    }

    pub fn from_token(token: &str) -> Self {
        by_token(DENOISE_LEVELS, token).unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        row_of(DENOISE_LEVELS, self).map_or("None", |r| r.1)
    }

    pub fn token(self) -> &'static str {
        row_of(DENOISE_LEVELS, self).map_or("", |r| r.2)
    }
}

// ============================================================================
// Container
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    #[default]
    Mp4,
    M4v,
    Mkv,
    Avi,
    Ogm,
}

pub const CONTAINERS: &[Row<Container>] = &[
    (Container::Mp4, "MP4 File", "mp4"),
    (Container::M4v, "M4V File", "m4v"),
    (Container::Mkv, "MKV File", "mkv"),
    (Container::Avi, "AVI File", "avi"),
    (Container::Ogm, "OGM File", "ogm"),
];

impl Container {
    pub fn from_label(label: &str) -> Option<Self> {
        by_label(CONTAINERS, label)
    }

    /// Token doubles as the file extension
    pub fn from_token(token: &str) -> Option<Self> {
        by_token(CONTAINERS, token)
    }

    pub fn label(self) -> &'static str {
        row_of(CONTAINERS, self).map_or("", |r| r.1)
    }

    pub fn extension(self) -> &'static str {
        row_of(CONTAINERS, self).map_or("mp4", |r| r.2)
    }
}
