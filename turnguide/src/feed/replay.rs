//! Mock position file replay.
//!
//! Parses the mock GPS file format: one fix per line as
//! `latitude, longitude`, optional surrounding whitespace, blank lines
//! ignored. Malformed or out-of-range lines are skipped with a warning
//! so the tracker never sees bad data.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::warn;

use super::{FeedError, PositionFeed};
use crate::geo::{GeoError, GeoPoint};

/// Why a mock position line was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum FixParseError {
    /// The line did not split into exactly two comma-separated fields.
    #[error("expected 'latitude, longitude'")]
    WrongFieldCount,

    /// A field was not a decimal number.
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// Coordinates parsed but fell outside geodetic bounds.
    #[error(transparent)]
    OutOfRange(#[from] GeoError),
}

/// Replays fixes loaded from a mock position file (or supplied
/// directly), in order.
#[derive(Debug, Clone)]
pub struct ReplayFeed {
    fixes: VecDeque<GeoPoint>,
}

impl ReplayFeed {
    /// Load a mock position file, skipping unusable lines.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);

        let mut fixes = VecDeque::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            match parse_fix(text) {
                Ok(fix) => fixes.push_back(fix),
                Err(reason) => warn!(
                    line = index + 1,
                    %reason,
                    "skipping malformed position line"
                ),
            }
        }

        Ok(Self { fixes })
    }

    /// Build a feed from fixes already in memory.
    pub fn from_fixes(fixes: Vec<GeoPoint>) -> Self {
        Self {
            fixes: fixes.into(),
        }
    }

    /// Number of fixes not yet replayed.
    pub fn remaining(&self) -> usize {
        self.fixes.len()
    }
}

impl PositionFeed for ReplayFeed {
    fn next_fix(&mut self) -> Option<GeoPoint> {
        self.fixes.pop_front()
    }
}

/// Parse one `latitude, longitude` line.
fn parse_fix(text: &str) -> Result<GeoPoint, FixParseError> {
    let mut parts = text.split(',');
    let latitude = parse_coordinate(parts.next())?;
    let longitude = parse_coordinate(parts.next())?;
    if parts.next().is_some() {
        return Err(FixParseError::WrongFieldCount);
    }

    Ok(GeoPoint::new(latitude, longitude)?)
}

fn parse_coordinate(field: Option<&str>) -> Result<f64, FixParseError> {
    let field = field.ok_or(FixParseError::WrongFieldCount)?.trim();
    field
        .parse()
        .map_err(|_| FixParseError::NotANumber(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_replays_fixes_in_file_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "12.9000, 77.6000").unwrap();
        writeln!(file, "  12.9050 ,   77.6050  ").unwrap();
        writeln!(file, "12.9100,77.6100").unwrap();

        let mut feed = ReplayFeed::from_path(file.path()).unwrap();
        assert_eq!(feed.remaining(), 3);
        assert_eq!(feed.next_fix(), Some(point(12.9000, 77.6000)));
        assert_eq!(feed.next_fix(), Some(point(12.9050, 77.6050)));
        assert_eq!(feed.next_fix(), Some(point(12.9100, 77.6100)));
        assert_eq!(feed.next_fix(), None);
    }

    #[test]
    fn test_exhausted_feed_stays_exhausted() {
        let mut feed = ReplayFeed::from_fixes(vec![point(12.9, 77.6)]);
        assert!(feed.next_fix().is_some());
        assert!(feed.next_fix().is_none());
        assert!(feed.next_fix().is_none());
    }

    #[test]
    fn test_blank_lines_ignored() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file).unwrap();
        writeln!(file, "12.9, 77.6").unwrap();
        writeln!(file, "   ").unwrap();

        let feed = ReplayFeed::from_path(file.path()).unwrap();
        assert_eq!(feed.remaining(), 1);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "12.9000, 77.6000").unwrap();
        writeln!(file, "twelve, 77.6").unwrap();
        writeln!(file, "12.9").unwrap();
        writeln!(file, "12.9, 77.6, 400.0").unwrap();
        writeln!(file, "12.9100, 77.6100").unwrap();

        let mut feed = ReplayFeed::from_path(file.path()).unwrap();
        assert_eq!(feed.remaining(), 2);
        assert_eq!(feed.next_fix(), Some(point(12.9000, 77.6000)));
        assert_eq!(feed.next_fix(), Some(point(12.9100, 77.6100)));
    }

    #[test]
    fn test_out_of_range_lines_skipped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "91.0, 77.6").unwrap();
        writeln!(file, "12.9, 181.0").unwrap();
        writeln!(file, "12.9, 77.6").unwrap();

        let feed = ReplayFeed::from_path(file.path()).unwrap();
        assert_eq!(feed.remaining(), 1);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = ReplayFeed::from_path("/nonexistent/positions.txt");
        assert!(matches!(result, Err(FeedError::Io(_))));
    }

    #[test]
    fn test_parse_fix_errors() {
        assert_eq!(
            parse_fix("12.9"),
            Err(FixParseError::WrongFieldCount)
        );
        assert_eq!(
            parse_fix("a, 77.6"),
            Err(FixParseError::NotANumber("a".to_string()))
        );
        assert!(matches!(
            parse_fix("91.0, 77.6"),
            Err(FixParseError::OutOfRange(GeoError::InvalidLatitude(_)))
        ));
    }
}
