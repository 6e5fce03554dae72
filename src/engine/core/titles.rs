use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::QueryError;
use super::options::leading_token;

/// A title discovered on the source, e.g. "2 (01:30:00)"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub number: u32,
    /// H:MM:SS as reported by the scan
    pub duration: String,
}

impl Title {
    pub fn new(number: u32, duration: impl Into<String>) -> Self {
        Self {
            number,
            duration: duration.into(),
        }
    }

    /// Parse the dropdown form `<number> (<H:MM:SS>)`
    pub fn from_label(label: &str) -> Result<Self, QueryError> {
        let number = leading_token(label)
            .parse()
            .map_err(|_| QueryError::TitleLabel(label.to_string()))?;
        let duration = label
            .split_whitespace()
            .nth(1)
            .map(|d| d.trim_matches(|c| c == '(' || c == ')'))
            .ok_or_else(|| QueryError::TitleLabel(label.to_string()))?;

        Ok(Self::new(number, duration))
    }

    pub fn duration_secs(&self) -> Result<u64, QueryError> {
        parse_duration(&self.duration)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number, self.duration)
    }
}

/// Parse `H:MM:SS` into total seconds
pub fn parse_duration(duration: &str) -> Result<u64, QueryError> {
    let malformed = || QueryError::Duration(duration.to_string());

    let parts: Vec<u64> = duration
        .trim()
        .split(':')
        .map(|p| p.parse::<u64>().map_err(|_| malformed()))
        .collect::<Result<_, _>>()?;

    match parts.as_slice() {
        [h, m, s] if *m < 60 && *s < 60 => h
            .checked_mul(3600)
            .and_then(|secs| secs.checked_add(m * 60 + s))
            .ok_or_else(malformed),
        _ => Err(malformed()),
    }
}

/// Entry of the title dropdown: the "Automatic" placeholder or a scanned title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleOption {
    Automatic,
    Title(Title),
}

impl FromStr for TitleOption {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("automatic") {
            Ok(TitleOption::Automatic)
        } else {
            Title::from_label(s).map(TitleOption::Title)
        }
    }
}

/// Pick the longest title. Titles with unreadable durations are skipped;
/// on a tie the first one wins. The placeholder is never selected.
pub fn select_longest_title(titles: &[TitleOption]) -> Option<&Title> {
    let mut longest: Option<(&Title, u64)> = None;

    for option in titles {
        let TitleOption::Title(title) = option else {
            continue;
        };
        let secs = match title.duration_secs() {
            Ok(secs) => secs,
            Err(e) => {
                tracing::debug!("Skipping title {}: {}", title.number, e);
                continue;
            }
        };
        if longest.is_none_or(|(_, best)| secs > best) {
            longest = Some((title, secs));
        }
    }

    longest.map(|(title, _)| title)
}
