//! Per-format extraction strategies.
//!
//! Every recognized artifact shape is a small strategy behind the same
//! [`LogShape`] trait, selected by a file-name discriminator, each
//! producing the same [`ScanOutcome`]. New tool formats are added as new
//! shapes, not as branches inside one monolithic scanner.

use chrono::{DateTime, NaiveDateTime};
use flowtime_types::Artifact;

use crate::signatures::match_crash;
use crate::timestamp::{datetime_after_marker, parse_elapsed_hours};

/// Raw facts pulled out of one artifact, before status classification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    /// Reason text when a failure signature matched.
    pub crash: Option<String>,
    /// Elapsed hours recovered from progress markers, usable even when
    /// the run died before writing an end stamp.
    pub partial_elapsed_hours: Option<f64>,
}

/// One artifact shape the extractor knows how to read.
pub trait LogShape {
    /// Short discriminator name, used in trace output only.
    fn name(&self) -> &'static str;

    /// Whether this shape recognizes the artifact.
    fn matches(&self, artifact: &Artifact) -> bool;

    /// Pull timestamps, crash evidence and progress markers out of the
    /// text. Must not fail: anything unrecognizable is simply left out of
    /// the outcome and classification downgrades accordingly.
    fn scan(&self, text: &str) -> ScanOutcome;
}

/// Shape registry, most specific first. [`GenericShape`] matches
/// everything, so selection always succeeds.
pub const SHAPES: &[&(dyn LogShape + Sync)] = &[&StatusFileShape, &ToolLogShape, &GenericShape];

/// First registered shape recognizing the artifact.
#[must_use]
pub fn select_shape(artifact: &Artifact) -> &'static dyn LogShape {
    SHAPES
        .iter()
        .copied()
        .find(|shape| shape.matches(artifact))
        .unwrap_or(&GenericShape)
}

fn has_extension(artifact: &Artifact, wanted: &str) -> bool {
    artifact
        .path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}

// ---------------------------------------------------------------------------
// ToolLogShape — free-text tool transcript with stamped banner lines
// ---------------------------------------------------------------------------

const START_MARKERS: &[&str] = &["Started on", "Start time", "Run started at"];
const END_MARKERS: &[&str] = &["Finished on", "End time", "Run completed at"];
const ELAPSED_MARKERS: &[&str] = &["Elapsed time", "Elapsed"];

/// Transcript logs (`*.log`): banner lines carry the timestamps, progress
/// lines may carry `Elapsed time: H:MM:SS` stamps.
pub struct ToolLogShape;

impl LogShape for ToolLogShape {
    fn name(&self) -> &'static str {
        "tool-log"
    }

    fn matches(&self, artifact: &Artifact) -> bool {
        has_extension(artifact, "log")
    }

    fn scan(&self, text: &str) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        for line in text.lines() {
            if outcome.start.is_none() {
                outcome.start = START_MARKERS
                    .iter()
                    .find_map(|m| datetime_after_marker(line, m));
            }
            // Tools restart sections; the last end stamp is the real one.
            if let Some(end) = END_MARKERS
                .iter()
                .find_map(|m| datetime_after_marker(line, m))
            {
                outcome.end = Some(end);
            }
            if let Some(elapsed) = scan_elapsed(line) {
                outcome.partial_elapsed_hours = Some(elapsed);
            }
        }
        outcome.crash = match_crash(text).map(|sig| sig.reason.to_owned());
        outcome
    }
}

fn scan_elapsed(line: &str) -> Option<f64> {
    let marker = ELAPSED_MARKERS.iter().find_map(|m| {
        let pos = line.find(m)?;
        Some(&line[pos + m.len()..])
    })?;
    let value = marker.trim_start_matches([':', '=', ' ', '\t']);
    // The stamp may trail into free text ("0:13:12 (cpu 0:11:02)").
    let value = value.split_whitespace().next()?;
    parse_elapsed_hours(value)
}

// ---------------------------------------------------------------------------
// StatusFileShape — key = value progress files with epoch timestamps
// ---------------------------------------------------------------------------

/// Status files (`*.status`): `key = value` lines with `start_epoch` /
/// `end_epoch` seconds and an optional `result` verdict.
pub struct StatusFileShape;

impl LogShape for StatusFileShape {
    fn name(&self) -> &'static str {
        "status-file"
    }

    fn matches(&self, artifact: &Artifact) -> bool {
        has_extension(artifact, "status")
    }

    fn scan(&self, text: &str) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        for line in text.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            match key {
                "start_epoch" => outcome.start = parse_epoch(value),
                "end_epoch" => outcome.end = parse_epoch(value),
                "elapsed" => outcome.partial_elapsed_hours = parse_elapsed_hours(value),
                "result" => {
                    let verdict = value.to_ascii_lowercase();
                    if verdict.contains("crash") || verdict.contains("fail") {
                        outcome.crash = Some(format!("status result '{value}'"));
                    }
                }
                _ => {}
            }
        }
        outcome
    }
}

fn parse_epoch(value: &str) -> Option<NaiveDateTime> {
    let seconds: i64 = value.parse().ok()?;
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.naive_utc())
}

// ---------------------------------------------------------------------------
// GenericShape — fallback for anything with recognizable stamped lines
// ---------------------------------------------------------------------------

/// Last-resort shape: any text file whose start/end lines mention
/// starting or finishing and carry a parsable datetime.
pub struct GenericShape;

const GENERIC_START_WORDS: &[&str] = &["start", "begin"];
const GENERIC_END_WORDS: &[&str] = &["end", "finish", "complet", "done"];

impl LogShape for GenericShape {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn matches(&self, _artifact: &Artifact) -> bool {
        true
    }

    fn scan(&self, text: &str) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        for line in text.lines() {
            let lowered = line.to_ascii_lowercase();
            let stamp = line
                .char_indices()
                .filter(|(_, c)| *c == ':' || *c == '=')
                .find_map(|(i, _)| crate::timestamp::parse_datetime(&line[i + 1..]));
            let Some(stamp) = stamp else { continue };
            if outcome.start.is_none() && GENERIC_START_WORDS.iter().any(|w| lowered.contains(w)) {
                outcome.start = Some(stamp);
            } else if GENERIC_END_WORDS.iter().any(|w| lowered.contains(w)) {
                outcome.end = Some(stamp);
            }
        }
        outcome.crash = match_crash(text).map(|sig| sig.reason.to_owned());
        outcome
    }
}
