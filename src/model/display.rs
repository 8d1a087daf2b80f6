//! Timestamp parsing and human-readable formatting.
//!
//! Stored timestamps come from browser inputs and are not uniform: full
//! RFC 3339 strings, `datetime-local` values without an offset, or bare
//! dates. Parsing never fails loudly; callers get `None` and pick their own
//! fallback text.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Medium date, short time: `Jan 5, 2024, 9:30 AM`.
const MEDIUM_SHORT: &str = "%b %-d, %Y, %-I:%M %p";

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Time zone timestamps are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayZone {
    /// The zone of the machine rendering the text.
    #[default]
    Local,
    Utc,
}

impl DisplayZone {
    fn resolve_naive(self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            DisplayZone::Utc => Some(naive.and_utc()),
            DisplayZone::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Render `at` as a medium date with a short time.
    pub fn format_medium(self, at: DateTime<Utc>) -> String {
        match self {
            DisplayZone::Utc => at.format(MEDIUM_SHORT).to_string(),
            DisplayZone::Local => at.with_timezone(&Local).format(MEDIUM_SHORT).to_string(),
        }
    }
}

impl std::fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayZone::Local => write!(f, "local"),
            DisplayZone::Utc => write!(f, "utc"),
        }
    }
}

impl std::str::FromStr for DisplayZone {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(DisplayZone::Local),
            "utc" => Ok(DisplayZone::Utc),
            other => Err(format!("unknown display zone {:?} (expected local or utc)", other)),
        }
    }
}

/// Parse a stored timestamp.
///
/// Values without an offset are read in `zone`; bare dates are midnight UTC.
pub fn parse_timestamp(raw: &str, zone: DisplayZone) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return zone.resolve_naive(naive);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Render a timestamp the way the browser stores it (`toISOString`).
pub fn to_iso_millis(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
