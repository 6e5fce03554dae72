// Integration tests for chapter marker files
//
// The encoder writes the CSV referenced by --markers into its temp dir.

use hbquery::engine::{
    ChapterName, LINE_ENDING, QueryBuilder, QueryMode, TitleSelection, default_chapter_names,
};
use tempfile::TempDir;

use crate::common::assertions::*;
use crate::common::helpers::*;

fn named_chapters() -> Vec<ChapterName> {
    vec![
        ChapterName::new(1, "Opening"),
        ChapterName::new(2, "The Heist, Part 1"),
        ChapterName::new(3, "Credits"),
    ]
}

#[test]
fn test_markers_file_written_and_referenced() {
    let mut options = movie_options();
    options.chapters.markers = true;
    options.chapters.names = named_chapters();

    let (dir, encoded) = build(&options, QueryMode::Full);
    let csv_path = dir.path().join("MOVIE-2-chapters.csv");

    assert_eq!(encoded.markers_file.as_deref(), Some(csv_path.as_path()));
    assert_query_contains(
        &encoded.query,
        &format!("--markers=\"{}\"", csv_path.display()),
    );
    assert!(encoded.warnings.is_empty());

    let contents = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(
        contents,
        format!(
            "1,Opening{le}2,The Heist, Part 1{le}3,Credits{le}",
            le = LINE_ENDING
        )
    );
}

#[test]
fn test_automatic_title_file_name() {
    let mut options = movie_options();
    options.source.title = TitleSelection::Automatic;
    options.chapters.markers = true;
    options.chapters.names = default_chapter_names(Some(1), Some(2));

    let (dir, encoded) = build(&options, QueryMode::Full);
    assert_eq!(
        encoded.markers_file,
        Some(dir.path().join("MOVIE-chapters.csv"))
    );
}

#[test]
fn test_unwritable_directory_falls_back_to_plain_markers() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    let mut options = movie_options();
    options.chapters.markers = true;
    options.chapters.names = named_chapters();

    let encoded = QueryBuilder::new(&missing).build(&options, QueryMode::Full);

    assert_eq!(encoded.markers_file, None);
    assert_eq!(encoded.warnings.len(), 1);
    assert!(encoded.warnings[0].contains("chapter markers"));
    assert_query_contains(&encoded.query, " -m ");
    assert_query_not_contains(&encoded.query, "--markers");
    assert!(!missing.exists());
}

#[test]
fn test_markers_disabled_writes_nothing() {
    let mut options = movie_options();
    options.chapters.names = named_chapters();

    let (dir, encoded) = build(&options, QueryMode::Full);
    assert_eq!(encoded.markers_file, None);
    assert_query_not_contains(&encoded.query, "-m");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_rewrite_replaces_previous_names() {
    let mut options = movie_options();
    options.chapters.markers = true;
    options.chapters.names = named_chapters();

    let dir = TempDir::new().unwrap();
    let builder = QueryBuilder::new(dir.path());
    builder.build(&options, QueryMode::Full);

    options.chapters.names = vec![ChapterName::new(1, "Only")];
    let encoded = builder.build(&options, QueryMode::Full);

    let path = encoded.markers_file.expect("markers file should be written");
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        format!("1,Only{}", LINE_ENDING)
    );
}
