use std::str::FromStr;

use super::error::QueryError;
use super::tables::Container;

/// Raw values of a HandBrakeCLI query, one field per flag.
///
/// Values stay in CLI form (tokens, comma columns split into vectors);
/// `PresetApplier` turns them into `EncodingOptions`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedQuery {
    // Source
    pub source: Option<String>,
    pub title: Option<u32>,
    pub chapter_start: Option<u32>,
    pub chapter_finish: Option<u32>,

    // Destination
    pub destination: Option<String>,
    pub format: Option<String>,
    pub video_encoder: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,

    // Picture
    pub crop: Option<[u32; 4]>, // top, bottom, left, right
    pub deinterlace: Option<String>,
    pub denoise: Option<String>,
    pub deblock: bool,
    pub detelecine: bool,
    pub vfr: bool,
    pub grayscale: bool,
    pub anamorphic: bool,
    pub loose_anamorphic: bool,

    // Video
    pub video_bitrate: Option<u32>,
    pub target_size: Option<u32>,
    pub quality: Option<u8>, // 0-100
    pub two_pass: bool,
    pub turbo_first_pass: bool,
    pub framerate: Option<String>,
    pub ipod_atom: bool,
    pub optimize_mp4: bool,
    pub large_file: bool,

    // Audio columns, one entry per output track
    pub audio_tracks: Vec<String>,
    pub audio_encoders: Vec<String>,
    pub audio_bitrates: Vec<String>,
    pub sample_rates: Vec<String>,
    pub mixdowns: Vec<String>,
    pub drc: Vec<u32>, // tenths of the CLI value (2.5 -> 25)

    // Subtitles
    pub subtitle: Option<u32>,
    pub subtitle_scan: bool,
    pub forced_subtitles: bool,

    // Chapters / advanced
    pub chapter_markers: bool,
    pub markers_file: Option<String>,
    pub encoder_options: Option<String>,
    pub processors: Option<u32>,
    pub verbose: bool,
}

fn value_for(
    flag: &str,
    inline: Option<String>,
    rest: &mut impl Iterator<Item = String>,
) -> Result<String, QueryError> {
    inline
        .or_else(|| rest.next())
        .ok_or_else(|| QueryError::MissingValue(flag.to_string()))
}

fn number<T: FromStr>(flag: &str, value: &str) -> Result<T, QueryError> {
    value.trim().parse().map_err(|_| QueryError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

fn column(value: &str) -> Vec<String> {
    value.split(',').map(|v| v.trim().to_string()).collect()
}

fn parse_chapters(flag: &str, value: &str) -> Result<(u32, u32), QueryError> {
    match value.split_once('-') {
        Some((start, finish)) => Ok((number(flag, start)?, number(flag, finish)?)),
        None => {
            let chapter = number(flag, value)?;
            Ok((chapter, chapter))
        }
    }
}

fn parse_crop(flag: &str, value: &str) -> Result<[u32; 4], QueryError> {
    let margins: Vec<u32> = value
        .split(':')
        .map(|m| number(flag, m))
        .collect::<Result<_, _>>()?;

    margins.try_into().map_err(|_| QueryError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

fn parse_quality(flag: &str, value: &str) -> Result<u8, QueryError> {
    let factor: f64 = number(flag, value)?;
    if !(0.0..=1.0).contains(&factor) {
        return Err(QueryError::InvalidValue {
            flag: flag.to_string(),
            value: value.to_string(),
        });
    }
    Ok((factor * 100.0).round() as u8)
}

fn parse_drc(flag: &str, value: &str) -> Result<Vec<u32>, QueryError> {
    value
        .split(',')
        .map(|v| {
            let level: f64 = number(flag, v)?;
            if level < 0.0 {
                return Err(QueryError::InvalidValue {
                    flag: flag.to_string(),
                    value: v.to_string(),
                });
            }
            Ok((level * 10.0).round() as u32)
        })
        .collect()
}

/// Split a query string into `ParsedQuery`.
///
/// Double quotes group words; backslashes are ordinary characters.
/// Flags the encoder never emits are skipped.
pub fn parse_query(query: &str) -> Result<ParsedQuery, QueryError> {
    // Backslashes are literal in queries (Windows paths like "D:\" or UNC
    // shares); doubling them keeps shlex from treating them as escapes
    let escaped = query.replace('\\', r"\\");
    let tokens = shlex::split(&escaped).ok_or_else(|| QueryError::Tokenize(query.to_string()))?;
    let mut parsed = ParsedQuery::default();
    let mut rest = tokens.into_iter();

    while let Some(token) = rest.next() {
        // Long flags may carry their value inline: --denoise=weak
        let (flag, inline) = match token.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => {
                (flag.to_string(), Some(value.to_string()))
            }
            _ => (token, None),
        };
        let f = flag.as_str();

        match f {
            "-i" | "--input" => parsed.source = Some(value_for(f, inline, &mut rest)?),
            "-t" | "--title" => parsed.title = Some(number(f, &value_for(f, inline, &mut rest)?)?),
            "-c" | "--chapters" => {
                let (start, finish) = parse_chapters(f, &value_for(f, inline, &mut rest)?)?;
                parsed.chapter_start = Some(start);
                parsed.chapter_finish = Some(finish);
            }

            "-o" | "--output" => parsed.destination = Some(value_for(f, inline, &mut rest)?),
            "-f" | "--format" => parsed.format = Some(value_for(f, inline, &mut rest)?),
            "-e" | "--encoder" => parsed.video_encoder = Some(value_for(f, inline, &mut rest)?),
            "-w" | "--width" => parsed.width = Some(number(f, &value_for(f, inline, &mut rest)?)?),
            "-l" | "--height" => {
                parsed.height = Some(number(f, &value_for(f, inline, &mut rest)?)?)
            }

            "--crop" => parsed.crop = Some(parse_crop(f, &value_for(f, inline, &mut rest)?)?),
            "-d" | "--deinterlace" => {
                parsed.deinterlace = Some(value_for(f, inline, &mut rest)?)
            }
            "-8" | "--denoise" => parsed.denoise = Some(value_for(f, inline, &mut rest)?),
            "-7" | "--deblock" => parsed.deblock = true,
            "-9" | "--detelecine" => parsed.detelecine = true,
            "-V" | "--vfr" => parsed.vfr = true,
            "-g" | "--grayscale" => parsed.grayscale = true,
            "-p" | "--pixelratio" => parsed.anamorphic = true,
            "-P" | "--loosePixelratio" => parsed.loose_anamorphic = true,

            "-b" | "--vb" => {
                parsed.video_bitrate = Some(number(f, &value_for(f, inline, &mut rest)?)?)
            }
            "-S" | "--size" => {
                parsed.target_size = Some(number(f, &value_for(f, inline, &mut rest)?)?)
            }
            "-q" | "--quality" => {
                parsed.quality = Some(parse_quality(f, &value_for(f, inline, &mut rest)?)?)
            }
            "-2" | "--two-pass" => parsed.two_pass = true,
            "-T" | "--turbo" => parsed.turbo_first_pass = true,
            "-r" | "--rate" => parsed.framerate = Some(value_for(f, inline, &mut rest)?),
            "-I" | "--ipod-atom" => parsed.ipod_atom = true,
            "-O" | "--optimize" => parsed.optimize_mp4 = true,
            "-4" | "--large-file" => parsed.large_file = true,

            "-a" | "--audio" => parsed.audio_tracks = column(&value_for(f, inline, &mut rest)?),
            "-E" | "--aencoder" => {
                parsed.audio_encoders = column(&value_for(f, inline, &mut rest)?)
            }
            "-B" | "--ab" => parsed.audio_bitrates = column(&value_for(f, inline, &mut rest)?),
            "-R" | "--arate" => parsed.sample_rates = column(&value_for(f, inline, &mut rest)?),
            "-6" | "--mixdown" => parsed.mixdowns = column(&value_for(f, inline, &mut rest)?),
            "-D" | "--drc" => parsed.drc = parse_drc(f, &value_for(f, inline, &mut rest)?)?,

            "-s" | "--subtitle" => {
                parsed.subtitle = Some(number(f, &value_for(f, inline, &mut rest)?)?)
            }
            "-U" | "--subtitle-scan" => parsed.subtitle_scan = true,
            "-F" | "--subtitle-forced" => parsed.forced_subtitles = true,

            // -m takes no value; --markers=<file> names the CSV
            "-m" | "--markers" => {
                parsed.chapter_markers = true;
                parsed.markers_file = inline;
            }
            "-x" | "--x264opts" => parsed.encoder_options = Some(value_for(f, inline, &mut rest)?),
            "-C" | "--cpu" => {
                parsed.processors = Some(number(f, &value_for(f, inline, &mut rest)?)?)
            }
            "-v" | "--verbose" => parsed.verbose = true,

            other => tracing::debug!("Ignoring unrecognized query token '{}'", other),
        }
    }

    // The CLI picks the container from the output name when -f is absent
    if parsed.format.is_none() {
        parsed.format = parsed
            .destination
            .as_deref()
            .and_then(|d| d.rsplit_once('.'))
            .and_then(|(_, ext)| Container::from_token(ext))
            .map(|c| c.extension().to_string());
    }

    Ok(parsed)
}
