mod chapters;
mod error;
mod naming;
mod options;
mod preset;
mod query_cmd;
mod query_parser;
mod tables;
mod titles;

pub use chapters::{
    LINE_ENDING, chapter_csv, chapter_file_name, default_chapter_names, write_chapter_csv,
};
pub use error::{ChapterFileError, QueryError};
pub use naming::auto_destination;
pub use options::{
    AdvancedSettings, Anamorphic, AudioSettings, AudioTrack, ChapterName, ChapterSettings,
    CropMargins, CropMode, DestinationSettings, EncodingOptions, Framerate, MAX_AUDIO_TRACKS,
    PictureSettings, SampleRate, SourceSettings, SubtitleSelection, SubtitleSettings,
    TitleSelection, TrackSelection, VideoSettings,
};
pub use preset::{PresetApplier, drc_from_parsed, replace_extension};
pub use query_cmd::{
    EncodedQuery, QueryBuilder, QueryMode, format_drc, format_quality, generate_preview,
    generate_query, sample_destination,
};
pub use query_parser::{ParsedQuery, parse_query};
pub use tables::{
    AUDIO_ENCODERS, AudioEncoder, BASELINE_AUDIO_ENCODER, BROWSE_PLACEHOLDER, CONTAINERS,
    Container, DEFAULT_DIR_PLACEHOLDER, DEINTERLACE_LEVELS, DENOISE_LEVELS, Deinterlace, Denoise,
    MIXDOWNS, Mixdown, Row, VIDEO_ENCODERS, VideoEncoder,
};
pub use titles::{Title, TitleOption, parse_duration, select_longest_title};
