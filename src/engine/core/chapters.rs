//! Chapter marker names: default naming and the CSV consumed by `--markers`.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use super::error::ChapterFileError;
use super::options::{ChapterName, TitleSelection};
use super::tables::BROWSE_PLACEHOLDER;

/// Platform line terminator used between CSV rows
pub const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Default names for a chapter range: "Chapter 1" .. "Chapter N".
/// Rows are numbered from 1 regardless of the first chapter encoded.
pub fn default_chapter_names(start: Option<u32>, finish: Option<u32>) -> Vec<ChapterName> {
    let Some(finish) = finish else {
        return Vec::new();
    };
    let start = start.unwrap_or(1).max(1);
    if finish < start {
        return Vec::new();
    }

    (1..=finish - start + 1)
        .map(|i| ChapterName::new(i, format!("Chapter {}", i)))
        .collect()
}

/// Render rows as `<index>,<name>` lines. Names are written verbatim.
pub fn chapter_csv(names: &[ChapterName]) -> String {
    let mut csv = String::new();
    for chapter in names {
        let _ = write!(csv, "{},{}{}", chapter.index, chapter.name, LINE_ENDING);
    }
    csv
}

/// File name for a title's chapter CSV, unique per source file and title
pub fn chapter_file_name(source: &str, title: TitleSelection) -> String {
    let source = source.trim().trim_matches('"');
    if source.is_empty() || source == BROWSE_PLACEHOLDER {
        return "chapters.csv".to_string();
    }

    let file_name = source.rsplit(['\\', '/']).next().unwrap_or(source);
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    };
    if stem.is_empty() {
        return "chapters.csv".to_string();
    }

    match title {
        TitleSelection::Automatic => format!("{}-chapters.csv", stem),
        TitleSelection::Index(n) => format!("{}-{}-chapters.csv", stem, n),
    }
}

/// Write the chapter CSV to `path`.
///
/// Rows go to a temporary file next to `path` which is only renamed into
/// place after a complete write, so a failed write never leaves a truncated
/// CSV where the CLI would pick it up.
pub fn write_chapter_csv(path: &Path, names: &[ChapterName]) -> Result<(), ChapterFileError> {
    let io_err = |source: std::io::Error| ChapterFileError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(io_err)?;
    file.write_all(chapter_csv(names).as_bytes())
        .map_err(io_err)?;
    file.flush().map_err(io_err)?;
    file.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
