//! Wall-clock and elapsed-time parsing for tool log text.
//!
//! Signoff tools disagree about datetime spelling, so parsing tries a
//! small fixed list of formats in order. All of them are naive local
//! times; the logs carry no zone.

use chrono::NaiveDateTime;

/// Accepted datetime spellings, most common first.
///
/// `%e` is the space-padded day used by ctime-style stamps
/// (`Tue Nov 12 13:45:01 2024`, `Tue Nov  5 13:45:01 2024`).
const DATETIME_FORMATS: &[&str] = &[
    "%a %b %e %H:%M:%S %Y",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Parse a complete datetime string in any accepted format.
#[must_use]
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Parse the datetime that follows `marker` on `line`, tolerating the
/// `marker : value`, `marker: value` and `marker = value` separators the
/// various tools emit.
#[must_use]
pub fn datetime_after_marker(line: &str, marker: &str) -> Option<NaiveDateTime> {
    let pos = line.find(marker)?;
    let rest = line[pos + marker.len()..].trim_start_matches([':', '=', ' ', '\t']);
    parse_datetime(rest)
}

/// Parse an `H:MM:SS` elapsed-time stamp into hours.
#[must_use]
pub fn parse_elapsed_hours(raw: &str) -> Option<f64> {
    let mut parts = raw.trim().splitn(3, ':');
    let hours: f64 = parts.next()?.trim().parse().ok()?;
    let minutes: f64 = parts.next()?.trim().parse().ok()?;
    let seconds: f64 = parts.next()?.trim().parse().ok()?;
    if !(0.0..60.0).contains(&minutes) || !(0.0..60.0).contains(&seconds) {
        return None;
    }
    Some(hours + minutes / 60.0 + seconds / 3600.0)
}

/// Hours between two parsed timestamps, millisecond-accurate.
#[must_use]
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_milliseconds() as f64 / 3_600_000.0
}
