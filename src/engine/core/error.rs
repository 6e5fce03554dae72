use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a query string or a title list
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Query has unbalanced quoting: {0}")]
    Tokenize(String),

    #[error("Flag '{0}' expects a value")]
    MissingValue(String),

    #[error("Flag '{flag}' has invalid value '{value}'")]
    InvalidValue { flag: String, value: String },

    #[error("Malformed title duration '{0}' (expected H:MM:SS)")]
    Duration(String),

    #[error("Malformed title label '{0}'")]
    TitleLabel(String),
}

/// Failure to persist the chapter-name CSV
#[derive(Debug, Error)]
pub enum ChapterFileError {
    #[error("Failed to write chapter file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
