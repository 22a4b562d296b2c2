//! Date stamp formatting for strips and their file names.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// The calendar date printed on a strip.
///
/// Renders in US numeric order without zero padding (`10/18/2026`,
/// `1/5/2026`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateStamp {
    date: NaiveDate,
}

impl DateStamp {
    /// Today's date in the local timezone.
    pub fn today() -> Self {
        Self {
            date: Local::now().date_naive(),
        }
    }

    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Parse an ISO date (`2026-10-18`).
    pub fn parse_iso(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self::new)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Text stamped on the strip, e.g. `10/18/2026`.
    pub fn display_text(&self) -> String {
        format!(
            "{}/{}/{}",
            self.date.month(),
            self.date.day(),
            self.date.year()
        )
    }

    /// Filesystem-safe form with the separators replaced by hyphens.
    pub fn file_safe(&self) -> String {
        self.display_text().replace('/', "-")
    }
}

impl std::fmt::Display for DateStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_text())
    }
}
