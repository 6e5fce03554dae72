use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::QueryError;
pub use super::tables::{AudioEncoder, Container, Deinterlace, Denoise, Mixdown, VideoEncoder};

/// First whitespace-separated token of a dropdown label ("2 (01:30:00)" -> "2")
pub(crate) fn leading_token(label: &str) -> &str {
    label.split_whitespace().next().unwrap_or("")
}

// ============================================================================
// Selectors (serialized as their display labels)
// ============================================================================

/// Which DVD title to encode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TitleSelection {
    #[default]
    Automatic,
    Index(u32),
}

impl FromStr for TitleSelection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = leading_token(s);
        if token.is_empty() || token.eq_ignore_ascii_case("automatic") {
            return Ok(TitleSelection::Automatic);
        }
        token
            .parse()
            .map(TitleSelection::Index)
            .map_err(|_| QueryError::TitleLabel(s.to_string()))
    }
}

impl fmt::Display for TitleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleSelection::Automatic => write!(f, "Automatic"),
            TitleSelection::Index(n) => write!(f, "{}", n),
        }
    }
}

/// Source stream selector for an audio track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TrackSelection {
    #[default]
    Automatic,
    None,
    Index(u32),
}

impl TrackSelection {
    /// Token used in the `-a` column; automatic resolves to the first source track
    pub fn token(self) -> String {
        match self {
            TrackSelection::Automatic => "1".to_string(),
            TrackSelection::None => "none".to_string(),
            TrackSelection::Index(n) => n.to_string(),
        }
    }

    pub fn is_none(self) -> bool {
        self == TrackSelection::None
    }
}

impl FromStr for TrackSelection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = leading_token(s);
        if token.is_empty() || token.eq_ignore_ascii_case("automatic") {
            Ok(TrackSelection::Automatic)
        } else if token.eq_ignore_ascii_case("none") {
            Ok(TrackSelection::None)
        } else {
            token
                .parse()
                .map(TrackSelection::Index)
                .map_err(|_| QueryError::InvalidValue {
                    flag: "-a".to_string(),
                    value: s.to_string(),
                })
        }
    }
}

impl fmt::Display for TrackSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackSelection::Automatic => write!(f, "Automatic"),
            TrackSelection::None => write!(f, "None"),
            TrackSelection::Index(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SubtitleSelection {
    #[default]
    None,
    Autoselect,
    Index(u32),
}

impl FromStr for SubtitleSelection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = leading_token(s);
        if token.is_empty() || token.eq_ignore_ascii_case("none") {
            Ok(SubtitleSelection::None)
        } else if token.eq_ignore_ascii_case("autoselect") {
            Ok(SubtitleSelection::Autoselect)
        } else {
            token
                .parse()
                .map(SubtitleSelection::Index)
                .map_err(|_| QueryError::InvalidValue {
                    flag: "-s".to_string(),
                    value: s.to_string(),
                })
        }
    }
}

impl fmt::Display for SubtitleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubtitleSelection::None => write!(f, "None"),
            SubtitleSelection::Autoselect => write!(f, "Autoselect"),
            SubtitleSelection::Index(n) => write!(f, "{}", n),
        }
    }
}

/// Output sample rate in kHz as shown in the dropdown ("48", "44.1", ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SampleRate {
    Auto,
    Khz(String),
}

impl SampleRate {
    pub fn token(&self) -> &str {
        match self {
            SampleRate::Auto => "0",
            SampleRate::Khz(rate) => rate,
        }
    }
}

impl From<String> for SampleRate {
    fn from(s: String) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("auto") || s == "0" {
            SampleRate::Auto
        } else {
            SampleRate::Khz(s.to_string())
        }
    }
}

impl From<SampleRate> for String {
    fn from(rate: SampleRate) -> Self {
        match rate {
            SampleRate::Auto => "Auto".to_string(),
            SampleRate::Khz(rate) => rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Framerate {
    #[default]
    SameAsSource,
    Fixed(String),
}

impl From<String> for Framerate {
    fn from(s: String) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("same as source") {
            Framerate::SameAsSource
        } else {
            Framerate::Fixed(s.to_string())
        }
    }
}

impl From<Framerate> for String {
    fn from(rate: Framerate) -> Self {
        match rate {
            Framerate::SameAsSource => "Same as source".to_string(),
            Framerate::Fixed(rate) => rate,
        }
    }
}

macro_rules! selector_string_conversions {
    ($($ty:ty),*) => {$(
        impl TryFrom<String> for $ty {
            type Error = QueryError;
            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.to_string()
            }
        }
    )*};
}

selector_string_conversions!(TitleSelection, TrackSelection, SubtitleSelection);

// ============================================================================
// Picture
// ============================================================================

/// Crop margins in pixels; a blank margin encodes as 0 once any is set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CropMargins {
    pub top: Option<u32>,
    pub bottom: Option<u32>,
    pub left: Option<u32>,
    pub right: Option<u32>,
}

impl CropMargins {
    pub fn new(top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            top: Some(top),
            bottom: Some(bottom),
            left: Some(left),
            right: Some(right),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.top.is_none() && self.bottom.is_none() && self.left.is_none() && self.right.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropMode {
    /// Let the CLI detect crop itself (no flag)
    #[default]
    Automatic,
    /// Explicit `--crop 0:0:0:0`
    NoCrop,
    Custom(CropMargins),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anamorphic {
    #[default]
    Off,
    Strict,
    Loose,
}

// ============================================================================
// Settings sections
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub path: String,
    pub title: TitleSelection,
    pub chapter_start: Option<u32>,  // None = Auto
    pub chapter_finish: Option<u32>, // None = Auto
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationSettings {
    pub path: String,
    pub format: Container,
    pub video_encoder: VideoEncoder,
    pub width: Option<u32>,
    pub height: Option<u32>, // None = Auto
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PictureSettings {
    pub crop: CropMode,
    pub deinterlace: Deinterlace,
    pub denoise: Denoise,
    pub detelecine: bool,
    pub deblock: bool,
    pub grayscale: bool,
    pub anamorphic: Anamorphic,
    pub vfr: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    pub bitrate: Option<u32>,     // kbps
    pub target_size: Option<u32>, // MB
    pub quality: u8,              // 0-100, 0 = unset
    pub two_pass: bool,
    pub turbo_first_pass: bool,
    pub framerate: Framerate,
    pub large_file: bool,
    pub ipod_atom: bool,
    pub optimize_mp4: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioTrack {
    pub source: TrackSelection,
    pub encoder: Option<AudioEncoder>,
    pub bitrate: Option<u32>,
    pub sample_rate: Option<SampleRate>,
    pub mixdown: Mixdown,
    /// Slider position: 0 = no compression, each step adds 0.1 to the CLI value
    pub drc: u32,
}

impl AudioTrack {
    pub fn with_source(source: TrackSelection) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }
}

pub const MAX_AUDIO_TRACKS: usize = 4;

/// Up to four output audio tracks. Track 1 always exists; tracks 2-4 only
/// carry settings while their selector is something other than "None".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub track1: AudioTrack,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track2: Option<AudioTrack>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track3: Option<AudioTrack>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track4: Option<AudioTrack>,
}

impl AudioSettings {
    /// Track `n` (1-based) if it takes part in the encode
    pub fn track(&self, n: usize) -> Option<&AudioTrack> {
        match n {
            1 => Some(&self.track1),
            2 => self.track2.as_ref(),
            3 => self.track3.as_ref(),
            4 => self.track4.as_ref(),
            _ => None,
        }
        .filter(|t| n == 1 || !t.source.is_none())
    }

    /// Store track `n`; tracks 2-4 with a "None" selector are dropped
    pub fn set_track(&mut self, n: usize, track: AudioTrack) {
        if n == 1 {
            self.track1 = track;
            return;
        }
        let keep = (!track.source.is_none()).then_some(track);
        match n {
            2 => self.track2 = keep,
            3 => self.track3 = keep,
            4 => self.track4 = keep,
            _ => {}
        }
    }

    pub fn disable_track(&mut self, n: usize) {
        match n {
            2 => self.track2 = None,
            3 => self.track3 = None,
            4 => self.track4 = None,
            _ => {}
        }
    }

    /// Tracks taking part in the encode, with their 1-based position
    pub fn active_tracks(&self) -> impl Iterator<Item = (usize, &AudioTrack)> {
        (1..=MAX_AUDIO_TRACKS).filter_map(|n| self.track(n).map(|t| (n, t)))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleSettings {
    pub selection: SubtitleSelection,
    pub forced_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterName {
    pub index: u32,
    pub name: String,
}

impl ChapterName {
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChapterSettings {
    pub markers: bool,
    pub names: Vec<ChapterName>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedSettings {
    /// Raw x264 option string passed through `-x`
    pub encoder_options: String,
    /// Thread count override; None = Automatic
    pub processors: Option<u32>,
}

/// Complete snapshot of the encode settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingOptions {
    pub source: SourceSettings,
    pub destination: DestinationSettings,
    pub picture: PictureSettings,
    pub video: VideoSettings,
    pub audio: AudioSettings,
    pub subtitles: SubtitleSettings,
    pub chapters: ChapterSettings,
    pub advanced: AdvancedSettings,
}
