use super::options::{EncodingOptions, TitleSelection};
use super::tables::{BROWSE_PLACEHOLDER, DEFAULT_DIR_PLACEHOLDER};

/// Disc image / stream extensions dropped from the source name
const STRIPPED_EXTENSIONS: [&str; 4] = [".iso", ".mpg", ".ts", ".ps"];

fn split_dir(path: &str) -> (&str, &str) {
    match path.rfind(['/', '\\']) {
        Some(i) => path.split_at(i + 1),
        None => ("", path),
    }
}

fn source_name(source: &str) -> &str {
    let (_, name) = split_dir(source.trim().trim_matches('"'));
    STRIPPED_EXTENSIONS
        .iter()
        .find_map(|ext| {
            let cut = name.len().checked_sub(ext.len())?;
            let (stem, tail) = (name.get(..cut)?, name.get(cut..)?);
            tail.eq_ignore_ascii_case(ext).then_some(stem)
        })
        .unwrap_or(name)
}

/// Destination path derived from source, title and chapter range, e.g.
/// `/out/MOVIE_T2_C1-12.m4v`.
///
/// Returns `None` while no title is selected. An existing destination keeps
/// its directory and extension; otherwise the file goes to `default_dir`
/// with an `.mp4` extension.
pub fn auto_destination(options: &EncodingOptions, default_dir: &str) -> Option<String> {
    let TitleSelection::Index(title) = options.source.title else {
        return None;
    };
    let source = options.source.path.as_str();
    if source.trim().is_empty() || source == BROWSE_PLACEHOLDER {
        return None;
    }

    let bound = |b: Option<u32>| b.map(|n| n.to_string()).unwrap_or_default();
    let name = format!(
        "{}_T{}_C{}-{}",
        source_name(source),
        title,
        bound(options.source.chapter_start),
        bound(options.source.chapter_finish)
    );

    let current = options.destination.path.trim();
    let (dir, file) = split_dir(current);
    if !dir.is_empty() {
        let ext = file
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
            .unwrap_or_else(|| options.destination.format.extension());
        return Some(format!("{}{}.{}", dir, name, ext));
    }

    let default_dir = default_dir.trim();
    let dir = if default_dir.is_empty() || default_dir == DEFAULT_DIR_PLACEHOLDER {
        String::new()
    } else if default_dir.ends_with(['/', '\\']) {
        default_dir.to_string()
    } else {
        format!("{}{}", default_dir, std::path::MAIN_SEPARATOR)
    };
    Some(format!("{}{}.mp4", dir, name))
}
