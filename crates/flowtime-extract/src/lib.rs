//! Artifact extraction: one raw log or status file in, one immutable
//! [`StageRun`] out.
//!
//! Extraction never fails at the batch level. Malformed timestamps or
//! unrecognizable structure degrade to a `ParseError` record carrying a
//! diagnostic, so one broken artifact cannot take down the whole analysis.
//! The record is classified against a single per-run "now" supplied by the
//! caller, never against a clock read here.

mod shape;
mod signatures;
mod timestamp;

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use flowtime_types::{Artifact, ExtractorConfig, StageRun, StageStatus};
use tracing::{debug, warn};

pub use shape::{select_shape, GenericShape, LogShape, ScanOutcome, StatusFileShape, ToolLogShape};
pub use signatures::{match_crash, CrashSignature, CRASH_SIGNATURES};
pub use timestamp::{datetime_after_marker, hours_between, parse_datetime, parse_elapsed_hours};

/// Extract one stage record from one artifact snapshot.
///
/// Status decision, in order:
/// 1. failure signature matched → `Crashed`, keeping any elapsed time the
///    progress markers recovered;
/// 2. start and end both parsed → `Ok` with the measured runtime;
/// 3. start but no end → `Running` if the artifact is still fresh within
///    `config.staleness` of `now` (boundary inclusive), else `Unknown`;
/// 4. nothing usable → `ParseError` with a reason.
pub fn extract_stage_run(
    artifact: &Artifact,
    now: NaiveDateTime,
    config: &ExtractorConfig,
) -> StageRun {
    let shape = select_shape(artifact);
    let outcome = shape.scan(&artifact.text);
    debug!(
        shape = shape.name(),
        path = %artifact.path.display(),
        "scanned artifact"
    );

    let (status, runtime_hours, end, diagnostic) = classify(&outcome, artifact, now, config);
    if status == StageStatus::ParseError {
        warn!(
            path = %artifact.path.display(),
            reason = diagnostic.as_deref().unwrap_or(""),
            "artifact did not extract"
        );
    }

    StageRun {
        name: stage_name(&artifact.path),
        category: artifact.category.clone(),
        group_key: artifact.group_key.clone(),
        start: outcome.start,
        end,
        status,
        runtime_hours,
        source_ref: absolutize(&artifact.path),
        diagnostic,
    }
}

type Classification = (StageStatus, Option<f64>, Option<NaiveDateTime>, Option<String>);

fn classify(
    outcome: &ScanOutcome,
    artifact: &Artifact,
    now: NaiveDateTime,
    config: &ExtractorConfig,
) -> Classification {
    if let Some(reason) = &outcome.crash {
        // Prefer the explicit progress marker; fall back to the stamped
        // span if the tool managed to write one before dying.
        let recovered = outcome.partial_elapsed_hours.or_else(|| {
            match (outcome.start, outcome.end) {
                (Some(s), Some(e)) if e >= s => Some(hours_between(s, e)),
                _ => None,
            }
        });
        return (
            StageStatus::Crashed,
            recovered,
            outcome.end,
            Some(reason.clone()),
        );
    }

    match (outcome.start, outcome.end) {
        (Some(start), Some(end)) if end >= start => (
            StageStatus::Ok,
            Some(hours_between(start, end)),
            Some(end),
            None,
        ),
        (Some(_), Some(_)) => (
            StageStatus::ParseError,
            None,
            None,
            Some("end timestamp precedes start".to_owned()),
        ),
        (None, Some(_)) => (
            StageStatus::ParseError,
            None,
            None,
            Some("end timestamp without a start".to_owned()),
        ),
        (Some(_), None) => {
            let age = now - artifact.last_modified;
            if age <= config.staleness {
                (StageStatus::Running, None, None, None)
            } else {
                (StageStatus::Unknown, None, None, None)
            }
        }
        (None, None) => (
            StageStatus::ParseError,
            None,
            None,
            Some("no usable timestamps found".to_owned()),
        ),
    }
}

/// Canonical stage name: the artifact file stem. Group attribution lives
/// in `group_key` alone and is never folded into the name.
fn stage_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned())
}

/// Resolve the artifact path to an absolute reference at extraction time,
/// so downstream links work regardless of the renderer's own location.
fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
